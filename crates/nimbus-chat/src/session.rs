//! Conversation session: orchestrates intent resolution, provider
//! calls and mood mapping into an append-only message history.
//!
//! The session is an explicit value threaded through `handle_turn`;
//! there are no hidden mutable fields. Consuming the session per turn
//! also serializes turns by construction: a second turn cannot start
//! until the first one has returned the updated session.

use nimbus_weather::{ProviderError, WeatherProvider, WeatherQuery, WeatherSnapshot};
use serde::{Deserialize, Serialize};

use crate::faq;
use crate::intent::{self, ResolvedIntent};
use crate::mood::{mood_for_condition, mood_for_outcome, MoodState, TurnOutcome};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

/// One chat message. Immutable once appended; ordering in the history
/// is append-only and significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub origin: Origin,
    pub text: String,
}

/// The assistant's opening message.
pub const GREETING: &str = "Hi! Ask me about the weather in any city.";

const USAGE_REPLY: &str =
    "Hey! You can ask me like: 'weather in Delhi' or 'temperature in Mumbai'";
const INVALID_CITY_REPLY: &str =
    "Please specify a valid city name. Example: 'weather in Delhi'";
const FETCH_FAILED_REPLY: &str = "Failed to fetch weather. Try again later.";
const UNKNOWN_REPLY: &str =
    "I didn't understand that. Try asking about the weather in a specific city.";

/// One conversation: message history, current mood, FAQ menu flag.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
    mood: MoodState,
    faq_menu_visible: bool,
}

impl ChatSession {
    /// An empty session with an idle mood.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session seeded with the assistant's opening message.
    pub fn with_greeting() -> Self {
        let mut session = Self::new();
        session.push(Origin::Assistant, GREETING);
        session
    }

    /// Message history, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The mood driving the presentation layer right now.
    pub fn mood(&self) -> MoodState {
        self.mood
    }

    /// Whether the presentation layer should render FAQ shortcuts.
    pub fn faq_menu_visible(&self) -> bool {
        self.faq_menu_visible
    }

    fn push(&mut self, origin: Origin, text: impl Into<String>) {
        let text = text.into();
        debug_assert!(!text.is_empty(), "messages must have non-empty text");
        self.messages.push(Message { origin, text });
    }

    /// Run one conversation turn.
    ///
    /// Empty or whitespace-only input is a no-op: nothing is appended
    /// and the mood does not change. Every other input appends the user
    /// message, resolves the intent before any network call, and always
    /// produces a reply and a defined mood - no branch fails the turn.
    pub async fn handle_turn<P>(mut self, provider: &P, input: &str) -> (Self, Option<Message>)
    where
        P: WeatherProvider + ?Sized,
    {
        if input.trim().is_empty() {
            return (self, None);
        }

        // The FAQ shortcut menu only survives the turn that opened it
        self.faq_menu_visible = false;

        self.push(Origin::User, input);

        let (mood, reply) = match intent::resolve(input) {
            ResolvedIntent::CityWeather { city } => answer_weather(provider, &city).await,
            ResolvedIntent::InvalidCity => (
                mood_for_outcome(TurnOutcome::InvalidCity),
                INVALID_CITY_REPLY.to_string(),
            ),
            ResolvedIntent::Greeting => (
                mood_for_outcome(TurnOutcome::Greeting),
                USAGE_REPLY.to_string(),
            ),
            ResolvedIntent::Help => {
                self.faq_menu_visible = true;
                (mood_for_outcome(TurnOutcome::HelpShown), help_reply())
            }
            ResolvedIntent::Faq { key } => match faq::lookup(&key) {
                Some(answer) => (mood_for_outcome(TurnOutcome::FaqAnswered), answer.to_string()),
                None => (
                    mood_for_outcome(TurnOutcome::Unrecognized),
                    UNKNOWN_REPLY.to_string(),
                ),
            },
            ResolvedIntent::Unknown => (
                mood_for_outcome(TurnOutcome::Unrecognized),
                UNKNOWN_REPLY.to_string(),
            ),
        };

        self.mood = mood;
        self.push(Origin::Assistant, reply);
        let reply_message = self.messages.last().cloned();

        (self, reply_message)
    }
}

/// The single suspension point of a turn: one provider call, one outcome.
async fn answer_weather<P>(provider: &P, city: &str) -> (MoodState, String)
where
    P: WeatherProvider + ?Sized,
{
    match provider
        .fetch_current(&WeatherQuery::City(city.to_string()))
        .await
    {
        Ok(snapshot) => (mood_for_condition(snapshot.category), weather_reply(&snapshot)),
        Err(ProviderError::NetworkFailure(detail)) => {
            tracing::warn!("Weather fetch for {} failed: {}", city, detail);
            (
                mood_for_outcome(TurnOutcome::ProviderUnreachable),
                FETCH_FAILED_REPLY.to_string(),
            )
        }
        Err(err) => {
            tracing::debug!("No weather info for {}: {}", city, err);
            (
                mood_for_outcome(TurnOutcome::CityNotFound),
                format!("I couldn't find weather info for \"{}\".", city),
            )
        }
    }
}

fn help_reply() -> String {
    let mut lines = vec!["You can ask me these questions:".to_string()];
    lines.extend(faq::questions().map(|q| format!("- {}", q)));
    lines.push(String::new());
    lines.push("Pick a question below to ask it instantly!".to_string());
    lines.join("\n")
}

fn weather_reply(snapshot: &WeatherSnapshot) -> String {
    let rain_line = if snapshot.will_rain() {
        "Yes, so you might want an umbrella!"
    } else {
        "No, skies look mostly clear!"
    };

    format!(
        "Here's the latest weather update for {}:\n\
         It's currently {}\u{b0}C with {}.\n\
         Humidity is around {}%.\n\
         Will it rain? {}",
        capitalize(&snapshot.city),
        snapshot.temperature_c,
        snapshot.description,
        snapshot.humidity_pct,
        rain_line
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
