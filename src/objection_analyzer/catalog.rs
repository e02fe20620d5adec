// WHY: Static catalog of cognitive-bias objection patterns shared by every analysis
// Declaration order is observable: it breaks score ties in the ranked output

use serde::Serialize;

/// One named resistance a recipient may feel, keyed by lowercase substrings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObjectionPattern {
    /// Stable identifier, unique across the catalog
    pub id: &'static str,
    pub name: &'static str,
    /// Underlying cognitive bias
    pub bias: &'static str,
    /// First-person framing of the objection
    pub description: &'static str,
    /// Substrings that raise suspicion of this objection (+2 each)
    pub triggers: &'static [&'static str],
    /// Substrings that mitigate this objection (-1 each)
    pub negative_triggers: &'static [&'static str],
    /// Whether overall word count adds to the score
    pub length_based: bool,
    /// Actionable rewrite guidance
    pub reframe: &'static str,
}

/// Phrases that signal the sender did some research on the recipient
pub const PERSONALIZATION_PHRASES: &[&str] = &["noticed", "saw your", "your post", "your recent"];

/// The shipped pattern catalog, in evaluation order
pub static OBJECTION_PATTERNS: &[ObjectionPattern] = &[
    ObjectionPattern {
        id: "status_quo_bias",
        name: "Status Quo Resistance",
        bias: "Status Quo Bias",
        description: "Why should I change what's already working?",
        triggers: &["new", "change", "switch", "transform", "revolutionize", "different", "innovative"],
        negative_triggers: &["current", "existing", "already"],
        length_based: false,
        reframe: "Acknowledge their current approach works, then position your offer as an enhancement, not replacement. Use: 'Building on what you already do well...'",
    },
    ObjectionPattern {
        id: "time_scarcity",
        name: "Time Investment Fear",
        bias: "Scarcity Heuristic",
        description: "I don't have time to evaluate this or implement something new.",
        triggers: &["quick call", "chat", "meeting", "demo", "15 minutes", "30 minutes", "schedule"],
        negative_triggers: &["busy", "time"],
        length_based: false,
        reframe: "Lead with the time they'll SAVE, not the time you're asking for. Quantify: '5 mins now could save 3 hours/week.'",
    },
    ObjectionPattern {
        id: "trust_deficit",
        name: "Stranger Danger",
        bias: "In-group Bias",
        description: "Who is this person? Why should I trust them?",
        triggers: &["i am", "i'm", "my name is", "i help", "i work with"],
        negative_triggers: &["referred", "mutual", "colleague", "recommended"],
        length_based: false,
        reframe: "Add social proof early: mutual connections, recognizable clients, or specific knowledge about THEIR world that proves you're an insider.",
    },
    ObjectionPattern {
        id: "loss_aversion",
        name: "Hidden Cost Fear",
        bias: "Loss Aversion",
        description: "What's the catch? What will this cost me?",
        triggers: &["free", "no obligation", "complimentary", "no cost", "just", "only"],
        negative_triggers: &[],
        length_based: false,
        reframe: "Paradoxically, 'free' triggers suspicion. Be upfront about what you want: 'I'm reaching out because I want to work with companies like yours. Here's what I'd need from you...'",
    },
    ObjectionPattern {
        id: "relevance_doubt",
        name: "Not-For-Me Dismissal",
        bias: "Base Rate Neglect",
        description: "This is generic spam. They don't actually know my situation.",
        triggers: &["companies like yours", "businesses in your industry", "professionals like you", "people in your position"],
        negative_triggers: &["specifically", "noticed that you", "saw your post", "your recent"],
        length_based: false,
        reframe: "Include ONE hyper-specific detail that proves research: a recent post they made, a specific challenge in their niche, their company's recent news.",
    },
    ObjectionPattern {
        id: "commitment_fear",
        name: "Slippery Slope Anxiety",
        bias: "Commitment Escalation",
        description: "If I respond, I'll be trapped in a sales funnel.",
        triggers: &["partnership", "long-term", "ongoing", "relationship", "work together"],
        negative_triggers: &["one-time", "single", "no commitment", "try"],
        length_based: false,
        reframe: "Offer a clear, small, reversible first step. 'Reply with one word: interested or not. Either way, no follow-ups unless you want them.'",
    },
    ObjectionPattern {
        id: "authority_skepticism",
        name: "Credibility Gap",
        bias: "Authority Bias (Inverted)",
        description: "Why should I listen to YOU specifically?",
        triggers: &["expert", "specialist", "years of experience", "proven", "guaranteed"],
        negative_triggers: &["results for", "helped", "case study", "example"],
        length_based: false,
        reframe: "Show, don't tell. Replace claims with evidence: 'Last month, I helped [similar company] achieve [specific metric]' beats 'I'm an expert.'",
    },
    ObjectionPattern {
        id: "cognitive_load",
        name: "TLDR Reflex",
        bias: "Cognitive Load Aversion",
        description: "This is too long/complex. I'll read it later (never).",
        triggers: &[],
        negative_triggers: &[],
        length_based: true,
        reframe: "Front-load the value. First sentence should answer: 'Why should I care?' Cut everything that doesn't serve that goal. Aim for <100 words.",
    },
];

/// Look up a catalog pattern by its stable id
pub fn find_pattern(id: &str) -> Option<&'static ObjectionPattern> {
    OBJECTION_PATTERNS.iter().find(|pattern| pattern.id == id)
}
