//! Rule-based weather chat for Nimbus
//!
//! Classifies user utterances, answers canned FAQs, fetches current
//! conditions for named cities through a provider interface, and keeps
//! the mood state the presentation layer animates.

pub mod faq;
pub mod intent;
pub mod mood;
pub mod session;

pub use intent::{resolve, ResolvedIntent};
pub use mood::{mood_for_condition, mood_for_outcome, MoodState, TurnOutcome};
pub use session::{ChatSession, Message, Origin, GREETING};
