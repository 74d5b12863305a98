//! The canned-answer "AI". A fixed ordered keyword table decides the reply;
//! an artificial delay stands in for inference time.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

/// Appended in place of a reply when the engine fails. The failure itself is
/// swallowed; the conversation always gets an answer.
pub const APOLOGY_MESSAGE: &str = "❌ AI is taking a break. Try asking: 'Where does plastic go?'";

/// Errors that can occur while composing a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    /// The engine could not produce an answer. Recovered by the apology
    /// message, never surfaced to the caller.
    Compute(String),
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyError::Compute(msg) => write!(f, "compute error: {msg}"),
        }
    }
}

impl std::error::Error for ReplyError {}

/// The seam between the chat panel and whatever answers questions.
#[async_trait]
pub trait ReplyEngine: Send + Sync {
    /// Returns the name of the engine.
    fn name(&self) -> &str;

    /// Composes a reply to the user's question.
    async fn reply(&self, question: &str) -> Result<String, ReplyError>;
}

/// Substring matcher dressed up as an assistant. Rules are checked in order;
/// the first hit wins.
pub struct KeywordEngine {
    thinking_delay: Duration,
}

impl KeywordEngine {
    pub fn new(thinking_delay: Duration) -> Self {
        Self { thinking_delay }
    }
}

#[async_trait]
impl ReplyEngine for KeywordEngine {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn reply(&self, question: &str) -> Result<String, ReplyError> {
        tokio::time::sleep(self.thinking_delay).await;
        let reply = reply_for(question);
        debug!("Keyword engine answered {} chars", reply.len());
        Ok(reply.to_string())
    }
}

/// The actual "intelligence": case-insensitive substring match against a
/// fixed ordered keyword list.
pub fn reply_for(question: &str) -> &'static str {
    let lower = question.to_lowercase();

    if lower.contains("plastic") {
        "Plastic items go in the DRY WASTE bin! 🗑️ Clean them first and remove labels. \
         You earn 5 green points!"
    } else if lower.contains("paper") {
        "Paper goes in DRY WASTE bin! 📄 But wet/dirty paper goes to wet waste. \
         You earn 3 green points!"
    } else if lower.contains("organic") || lower.contains("food") {
        "Organic/food waste goes in WET WASTE bin! 🥬 Perfect for composting. \
         You earn 4 green points!"
    } else if lower.contains("battery") || lower.contains("electronic") {
        "E-waste needs special handling! 🔋 Take to nearest e-waste collection center. \
         You earn 10 green points!"
    } else if lower.contains("glass") {
        "Glass goes in DRY WASTE bin! 🫙 But be careful with broken glass - wrap it safely first. \
         You earn 4 green points!"
    } else if lower.contains("metal") {
        "Metal cans and containers go in DRY WASTE bin! 🥫 Clean them first for better recycling. \
         You earn 6 green points!"
    } else {
        "Great question! Generally: Plastic/Paper/Glass/Metal = Dry waste, \
         Food/Organic = Wet waste, Electronics/Batteries = E-waste collection. \
         You earn 2 green points for asking!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Macro to generate keyword routing test cases.
    /// $name:ident names the test, $question:expr is the user input,
    /// $fragment:expr must appear in the chosen reply.
    macro_rules! test_reply_rules {
        ( $($name:ident: $question:expr => $fragment:expr,)+ ) => {
            $(
                #[test]
                fn $name() {
                    let reply = reply_for($question);
                    assert!(
                        reply.contains($fragment),
                        "reply {:?} missing {:?}",
                        reply,
                        $fragment
                    );
                }
            )+
        };
    }

    test_reply_rules! {
        test_reply_plastic: "Where should I throw this plastic bottle?" => "DRY WASTE",
        test_reply_plastic_points: "plastic" => "5 green points",
        test_reply_paper: "what about paper" => "3 green points",
        test_reply_organic: "organic scraps?" => "WET WASTE",
        test_reply_food_alias: "leftover food" => "WET WASTE",
        test_reply_battery: "how to dispose batteries?" => "E-waste",
        test_reply_electronic_alias: "old electronics" => "e-waste collection center",
        test_reply_glass: "Where does glass go?" => "DRY WASTE",
        test_reply_metal: "a metal can" => "6 green points",
        test_reply_fallback: "what is the meaning of life" => "2 green points for asking",
    }

    #[test]
    fn test_reply_is_case_insensitive() {
        assert_eq!(reply_for("PLASTIC"), reply_for("plastic"));
        assert_eq!(reply_for("BaTtErY"), reply_for("battery"));
    }

    #[test]
    fn test_rule_order_plastic_beats_metal() {
        // "plastic" is checked before "metal"; a question mentioning both
        // gets the plastic answer.
        let reply = reply_for("plastic or metal?");
        assert!(reply.contains("Plastic items"));
    }

    #[test]
    fn test_keyword_engine_answers() {
        let engine = KeywordEngine::new(Duration::ZERO);
        let reply = tokio_test::block_on(engine.reply("Where does glass go?"))
            .expect("keyword engine is infallible");
        assert!(reply.contains("DRY WASTE"));
    }
}
