use serde::{Deserialize, Serialize};

/// Label assigned to messages that look like drug dealing or buying.
pub const SUSPICIOUS: u8 = 1;
/// Label assigned to ordinary chatter.
pub const BENIGN: u8 = 0;

/// A labelled message used to fit the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: u8,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: u8) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    pub fn is_suspicious(&self) -> bool {
        self.label == SUSPICIOUS
    }
}

/// The fixed training set, as (text, label) pairs.
///
/// Several benign rows deliberately reuse trigger words ("fire", "plug",
/// "direct message") so the model cannot key on a single token.
pub const TRAINING_CORPUS: &[(&str, u8)] = &[
    ("🍁🔥 top quality available wickr dealer123", SUSPICIOUS),
    ("need plug in nyc dm for menu", SUSPICIOUS),
    ("just posting about my gardening hobby", BENIGN),
    ("looking for friends to hang out with", BENIGN),
    ("special treats available signal only", SUSPICIOUS),
    ("check out my new blog about technology", BENIGN),
    (
        "Yo, I need a half-zip of that White Girl ❄️. What's the drop point and price?",
        SUSPICIOUS,
    ),
    (
        "Got the brick 📦 ready. My guy will be at the meetup point in 15.",
        SUSPICIOUS,
    ),
    (
        "Looking for party supplies. I only accept cashapp and venmo.",
        SUSPICIOUS,
    ),
    ("I'm so excited for the new season of my favorite show!", BENIGN),
    ("Looking for a new gaming PC, any recommendations?", BENIGN),
    (
        "I have some new merchandise available for sale, DM for details.",
        BENIGN,
    ),
    ("Just got some new kicks, directmessage for photos.", BENIGN),
    (
        "I have some new seeds for my garden. Let me know if you want to trade.",
        BENIGN,
    ),
    ("I'm at the meetup point, come get the goods.", SUSPICIOUS),
    ("Looking to score an ounce or two for the weekend.", SUSPICIOUS),
    ("I have a friend who can connect you, hitmeup.", SUSPICIOUS),
    ("This new music album is fire.", BENIGN),
    ("I'm looking for a new direct message app.", BENIGN),
    ("Can you give me a direct message?", BENIGN),
    ("Let me know if you are looking for some snow.", SUSPICIOUS),
    ("Party at my place tonight, bring your friends!", BENIGN),
    ("What's a good price for a new phone?", BENIGN),
    ("My car is in the shop, I need a ride.", BENIGN),
    ("Can anyone connect me with a job opportunity?", BENIGN),
    ("Looking for some new plants for my balcony garden.", BENIGN),
    ("What's a good plug for laptop accessories?", BENIGN),
    ("Got the pills from the plug, ready to go.", SUSPICIOUS),
    ("I'm feeling so happy, these treats are amazing!", SUSPICIOUS),
    ("Let's get some food and chill tonight.", BENIGN),
];

/// Returns the training set as owned examples, in corpus order.
pub fn training_examples() -> Vec<TrainingExample> {
    TRAINING_CORPUS
        .iter()
        .map(|&(text, label)| TrainingExample::new(text, label))
        .collect()
}
