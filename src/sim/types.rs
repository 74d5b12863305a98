use chrono::{DateTime, Local};

/// The three disposal categories the app talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteCategory {
    Dry,
    Wet,
    EWaste,
}

impl WasteCategory {
    /// Returns a human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            WasteCategory::Dry => "Dry Waste",
            WasteCategory::Wet => "Wet Waste",
            WasteCategory::EWaste => "E-Waste",
        }
    }
}

/// One entry of the fixed catalog the classifier scores on every tick.
#[derive(Debug, Clone, Copy)]
pub struct WasteItem {
    pub label: &'static str,
    pub category: WasteCategory,
    pub point_value: u32,
}

/// The fixed catalog of waste types the scanner recognizes.
pub const WASTE_CATALOG: [WasteItem; 4] = [
    WasteItem {
        label: "Plastic Bottle",
        category: WasteCategory::Dry,
        point_value: 5,
    },
    WasteItem {
        label: "Paper",
        category: WasteCategory::Dry,
        point_value: 3,
    },
    WasteItem {
        label: "Organic Waste",
        category: WasteCategory::Wet,
        point_value: 4,
    },
    WasteItem {
        label: "Metal Can",
        category: WasteCategory::Dry,
        point_value: 6,
    },
];

/// One scored catalog entry. The set is replaced wholesale on every scan
/// tick; there is no history.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: &'static str,
    /// Synthetic classifier probability in [0, 1).
    pub confidence: f64,
    pub category: WasteCategory,
    pub point_value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single conversation entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: ChatRole,
    pub text: String,
    pub created_at: DateTime<Local>,
}

pub const WELCOME_MESSAGE: &str = "Hello! I'm your AI waste segregation assistant! \
    Ask me anything about proper waste disposal. For example: \
    'Where does plastic go?' or 'How to dispose batteries?'";

/// Append-only conversation log, seeded with one welcome message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatLog {
    pub fn new() -> Self {
        let mut log = ChatLog {
            messages: Vec::new(),
            next_id: 1,
        };
        log.push(ChatRole::Assistant, WELCOME_MESSAGE.to_string());
        log
    }

    /// Appends a message and returns a reference to it. Ids are a monotonic
    /// counter, so ordering disputes can't arise from clock adjustments.
    pub fn push(&mut self, role: ChatRole, text: String) -> &ChatMessage {
        let message = ChatMessage {
            id: self.next_id,
            role,
            text,
            created_at: Local::now(),
        };
        self.next_id += 1;
        self.messages.push(message);
        self.messages.last().expect("just pushed")
    }

    pub fn push_user(&mut self, text: String) -> &ChatMessage {
        self.push(ChatRole::User, text)
    }

    pub fn push_assistant(&mut self, text: String) -> &ChatMessage {
        self.push(ChatRole::Assistant, text)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// The four dashboard counters. All non-negative; nothing ties them to real
/// physical quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImpactStats {
    pub items_scanned: u64,
    pub co2_saved_kg: u64,
    pub trees_equivalent: u64,
    pub points_earned: u64,
}
