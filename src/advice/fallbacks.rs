// Hardcoded default payloads, the last line of defense per endpoint
//
// Shapes mirror what the prompts ask the model for; a caller always receives
// one of these when the provider is down or its output is unparseable.

use serde_json::{json, Value};

pub fn roommate_matches() -> Value {
    json!([
        {
            "candidate_id": 1,
            "candidate_name": "Alex Chen",
            "compatibility_score": 78,
            "match_tier": "Good",
            "strengths": ["Similar sleep schedule", "Both value cleanliness"],
            "potential_conflicts": ["Different social habits"],
            "recommendation": "good",
            "tips": "Discuss guest policies and quiet hours early.",
            "conversation_starters": ["Ask about study routines", "Talk about weekend plans"]
        }
    ])
}

pub fn lease_analysis() -> Value {
    json!({
        "summary": "We could not analyze this lease automatically. Review it carefully before signing.",
        "red_flags": [],
        "key_terms": [
            {"term": "Deposit", "note": "Confirm the amount and the refund conditions in writing."},
            {"term": "Notice period", "note": "Check how much notice you must give before moving out."}
        ],
        "fraud_risk_score": 0,
        "recommendation": "review",
        "confidence": 0
    })
}

pub fn financial_guidance() -> Value {
    json!({
        "monthly_plan": {
            "essentials_percent": 50,
            "savings_percent": 20,
            "discretionary_percent": 30
        },
        "insights": ["Track expenses weekly to spot overspending early."],
        "tips": "Open a local student bank account to avoid foreign transaction fees.",
        "risk_level": "unknown"
    })
}

pub fn cultural_guidance() -> Value {
    json!({
        "weekly_focus": "Settling in",
        "advice": [
            "Join one student society this week to build a local circle.",
            "Learn a few phrases locals use daily; it opens doors."
        ],
        "cultural_notes": [],
        "encouragement": "Adjustment takes time. What feels foreign this month will feel routine by spring."
    })
}

pub fn cultural_discovery() -> Value {
    json!({
        "events": [],
        "community_summary": "We could not fetch events right now. Check your university's international office listings.",
        "active_groups": []
    })
}

pub fn financial_risk() -> Value {
    json!({
        "risk_level": "Unknown",
        "scam_type": "unknown",
        "red_flags": [],
        "analysis": "We could not analyze this text automatically. Treat unsolicited offers with caution.",
        "safe_alternative": "Verify the sender through an official channel before replying."
    })
}

pub fn community_recommendations() -> Value {
    json!({
        "recommended_activities": [
            {
                "title": "University welcome events",
                "reason": "Low-cost way to meet other new students during your first weeks.",
                "time_commitment": "1-2 hours per week"
            }
        ]
    })
}

pub fn community_connect() -> Value {
    json!({
        "results": [],
        "analysis_summary": "We could not fetch groups right now. Try your university's society directory."
    })
}

pub fn ask_community() -> Value {
    json!({
        "answer": "We could not answer this right now. Try again shortly, or post the question directly to the community.",
        "confidence": "low",
        "related_topics": []
    })
}

pub fn job_listings() -> Value {
    json!({
        "results": [],
        "summary": "We could not search jobs right now. Check your university's career portal."
    })
}

pub fn job_scam_check() -> Value {
    json!({
        "risk_level": "Unknown",
        "verdict": "review",
        "explanation": "We could not analyze this offer automatically. Never pay upfront fees and verify the employer independently."
    })
}

pub fn hostel_listings() -> Value {
    json!({
        "results": [],
        "search_summary": "We could not find listings right now. Try again or broaden your filters."
    })
}

pub fn emergency_support() -> Value {
    json!({
        "severity": "unknown",
        "immediate_steps": [
            "If you are in danger, contact local emergency services now.",
            "Reach out to your university's international student office."
        ],
        "contacts": [
            {"name": "Local emergency services", "number": "112"},
            {"name": "University support line", "number": "see your student portal"}
        ],
        "follow_up": "Talk to someone you trust about what happened."
    })
}
