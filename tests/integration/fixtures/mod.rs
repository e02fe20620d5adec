// Draft fixtures with known analyses
// WHY: Golden inputs keep expected scores next to the text that produces them

/// Generic pitch with status-quo, time and trust triggers
pub const COLD_PITCH: &str = "I am reaching out about a new, innovative solution. Quick call this week?";

/// Warm intro whose trust objection is fully mitigated
pub const WARM_INTRO: &str = "Hi, I'm referred by a mutual colleague. I noticed your recent post about scaling.";

/// Hits six patterns with one trigger each
pub const KITCHEN_SINK: &str = "new demo i help free partnership expert";

/// Heavily loaded draft expected to land in the high-risk band
pub const HIGH_RISK_PITCH: &str = "My name is Alex and I'm an expert specialist with years of experience. \
    Our new, innovative, proven platform will transform and revolutionize how companies like yours \
    and professionals like you work. It's free, no obligation, no cost, complimentary - just a quick call, \
    a demo or a 15 minutes meeting to schedule a long-term partnership and ongoing relationship. \
    Let's work together, guaranteed.";
