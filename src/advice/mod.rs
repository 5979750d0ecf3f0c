// Domain advice endpoints: prompt assembly plus fallback-shaped gateway calls

pub mod fallbacks;

use crate::gateway::{AdviceGateway, Modality};
use serde_json::Value;
use std::sync::Arc;

const JSON_ONLY: &str =
    "Respond with a single JSON value only, no commentary and no markdown fences.";

/// One service method per advice endpoint. Every method degrades to its
/// endpoint's default payload, so callers always get a well-shaped value.
pub struct AdviceService {
    gateway: Arc<AdviceGateway>,
}

impl AdviceService {
    pub fn new(gateway: Arc<AdviceGateway>) -> Self {
        Self { gateway }
    }

    pub async fn roommate_match(&self, user_profile: &Value, candidates: &[Value]) -> Value {
        let prompt = format!(
            "You are a roommate compatibility advisor for international students.\n\
             Score each candidate against the user's profile.\n\
             User profile: {}\nCandidates: {}\n\
             Return a JSON array; one object per candidate with fields: candidate_id, \
             candidate_name, compatibility_score (0-100), match_tier, strengths, \
             potential_conflicts, recommendation, tips, conversation_starters.\n{}",
            user_profile,
            Value::Array(candidates.to_vec()),
            JSON_ONLY
        );
        self.gateway
            .generate_json("roommate-match", &prompt, Modality::Text, None, fallbacks::roommate_matches())
            .await
    }

    /// Lease analysis over pasted text, or over a photographed lease page
    /// when `image` is provided (vision modality).
    pub async fn lease_analysis(&self, text: &str, image: Option<&[u8]>) -> Value {
        let prompt = format!(
            "You are a tenancy advisor for international students. Analyze this lease \
             for risks, unusual clauses and signs of rental fraud.\nLease: {}\n\
             Return a JSON object with fields: summary, red_flags, key_terms, \
             fraud_risk_score (0-100), recommendation (sign|review|avoid), confidence.\n{}",
            text, JSON_ONLY
        );
        let modality = if image.is_some() { Modality::Vision } else { Modality::Text };
        self.gateway
            .generate_json("lease-analysis", &prompt, modality, image, fallbacks::lease_analysis())
            .await
    }

    pub async fn financial_guidance(&self, profile: &Value) -> Value {
        let prompt = format!(
            "You are a financial advisor for students living abroad. Build a monthly \
             plan from this situation: {}\n\
             Return a JSON object with fields: monthly_plan (essentials_percent, \
             savings_percent, discretionary_percent), insights, tips, risk_level.\n{}",
            profile, JSON_ONLY
        );
        self.gateway
            .generate_json("financial-guidance", &prompt, Modality::Text, None, fallbacks::financial_guidance())
            .await
    }

    pub async fn cultural_guidance(
        &self,
        home_country: &str,
        host_country: &str,
        university: &str,
        week: u32,
        challenges: &str,
    ) -> Value {
        let prompt = format!(
            "You advise a student from {} studying at {} in {}. They are in week {} \
             abroad and report: {}\n\
             Return a JSON object with fields: weekly_focus, advice, cultural_notes, \
             encouragement.\n{}",
            home_country, university, host_country, week, challenges, JSON_ONLY
        );
        self.gateway
            .generate_json("cultural-guidance", &prompt, Modality::Text, None, fallbacks::cultural_guidance())
            .await
    }

    /// Cultural events and home-country communities in the host city.
    pub async fn cultural_discovery(
        &self,
        home_country: &str,
        host_country: &str,
        city: &str,
        date_range: &str,
    ) -> Value {
        let prompt = format!(
            "You are a cultural assistant for international students. Find cultural \
             programs, festivals and community functions in {} ({}) during {} organized \
             by communities from {}. For each event note its significance, audience, \
             dress code and how newcomer-friendly and trustworthy the organizer is.\n\
             Return a JSON object with fields: events (title, date, type, description, \
             location, cultural_significance, attendees, dress_code, trust_badge), \
             community_summary, active_groups.\n{}",
            city, host_country, date_range, home_country, JSON_ONLY
        );
        self.gateway
            .generate_json("cultural-discovery", &prompt, Modality::Text, None, fallbacks::cultural_discovery())
            .await
    }

    /// Scam-pattern analysis of an email, message or offer.
    pub async fn financial_risk(&self, text: &str) -> Value {
        let prompt = format!(
            "You are a financial fraud detection expert for students. Analyze this text \
             for scam patterns (upfront fees, urgency, too good to be true): {}\n\
             Return a JSON object with fields: risk_level (Low|Medium|High|Critical), \
             scam_type, red_flags, analysis, safe_alternative.\n{}",
            text, JSON_ONLY
        );
        self.gateway
            .generate_json("financial-risk", &prompt, Modality::Text, None, fallbacks::financial_risk())
            .await
    }

    pub async fn community_recommendations(&self, profile: &Value) -> Value {
        let prompt = format!(
            "You are a community advisor for international students. Recommend social \
             activities matched to this situation: {}\n\
             Return a JSON object with a recommended_activities array; each entry has \
             fields: title, reason, time_commitment.\n{}",
            profile, JSON_ONLY
        );
        self.gateway
            .generate_json(
                "community-recommendations",
                &prompt,
                Modality::Text,
                None,
                fallbacks::community_recommendations(),
            )
            .await
    }

    pub async fn community_connect(&self, user_profile: &Value, query: &str) -> Value {
        let prompt = format!(
            "You are a community manager for a global student platform. Suggest groups \
             and societies for this student.\nProfile: {}\nQuery: {}\n\
             Return a JSON object with fields: results (group name, focus, why_it_fits, \
             how_to_join), analysis_summary.\n{}",
            user_profile, query, JSON_ONLY
        );
        self.gateway
            .generate_json("community-connect", &prompt, Modality::Text, None, fallbacks::community_connect())
            .await
    }

    pub async fn ask_community(&self, community_context: &str, question: &str) -> Value {
        let prompt = format!(
            "Answer a student's question using what the community knows.\n\
             Community context: {}\nQuestion: {}\n\
             Return a JSON object with fields: answer, confidence (low|medium|high), \
             related_topics.\n{}",
            community_context, question, JSON_ONLY
        );
        self.gateway
            .generate_json("ask-community", &prompt, Modality::Text, None, fallbacks::ask_community())
            .await
    }

    pub async fn job_finder(&self, user_profile: &Value, query: &str) -> Value {
        let prompt = format!(
            "You are a part-time job advisor for international students. Suggest \
             realistic student-friendly jobs for this profile, respecting visa work \
             limits.\nProfile: {}\nQuery: {}\n\
             Return a JSON object with fields: results (title, employer_type, pay_range, \
             hours_per_week, why_it_fits), summary.\n{}",
            user_profile, query, JSON_ONLY
        );
        self.gateway
            .generate_json("job-finder", &prompt, Modality::Text, None, fallbacks::job_listings())
            .await
    }

    pub async fn job_scam_check(&self, text: &str) -> Value {
        let prompt = format!(
            "You are an employment fraud expert. Assess whether this job offer or \
             listing is a scam: {}\n\
             Return a JSON object with fields: risk_level (Low|Medium|High|Critical), \
             verdict (apply|review|avoid), explanation.\n{}",
            text, JSON_ONLY
        );
        self.gateway
            .generate_json("job-scam-check", &prompt, Modality::Text, None, fallbacks::job_scam_check())
            .await
    }

    pub async fn hostel_discovery(&self, query: &str, filters: &Value) -> Value {
        let prompt = format!(
            "You are a hostel recommendation expert for international students. Suggest \
             3-5 realistic housing options near universities.\nSearch query: {}\n\
             Filters: {}\n\
             Return a JSON object with fields: results (name, distance, verified, price, \
             type, facilities, best_for, pros, cons), search_summary.\n{}",
            query, filters, JSON_ONLY
        );
        self.gateway
            .generate_json("hostel-discovery", &prompt, Modality::Text, None, fallbacks::hostel_listings())
            .await
    }

    pub async fn emergency_support(&self, input_text: &str, language: &str) -> Value {
        let prompt = format!(
            "You are an emergency support assistant for international students. \
             Respond in language '{}'. Situation: {}\n\
             Return a JSON object with fields: severity (low|medium|high|unknown), \
             immediate_steps, contacts, follow_up.\n{}",
            language, input_text, JSON_ONLY
        );
        self.gateway
            .generate_json("emergency-support", &prompt, Modality::Text, None, fallbacks::emergency_support())
            .await
    }
}
