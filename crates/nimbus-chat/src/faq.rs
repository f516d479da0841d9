//! Fixed catalog of recognized questions with canned answers.
//!
//! Keys are stored normalized (lowercase, straight apostrophes); the
//! intent resolver matches against them exactly.

pub const FAQ_CATALOG: [(&str, &str); 8] = [
    (
        "what can you do?",
        "I can tell you the current weather in any city. Just ask something like 'weather in London'.",
    ),
    (
        "who made you?",
        "I was built by a developer who loves combining weather data with smart chat responses!",
    ),
    (
        "tell me a joke",
        "Why did the sun go to school? To get a little brighter!",
    ),
    (
        "are you a real person?",
        "Nope, I'm just a smart little chatbot here to help with weather info!",
    ),
    (
        "what's the weather like?",
        "I can check the weather for any city! Try saying: 'What's the weather in Tokyo?'",
    ),
    (
        "do i need an umbrella today?",
        "I can help with that! Just tell me your city like 'Will it rain in Delhi?'",
    ),
    (
        "what's the forecast for tomorrow?",
        "I'm currently showing live weather updates only. But I might get smarter soon!",
    ),
    (
        "what is humidity?",
        "Humidity is the amount of water vapor in the air. I show it in my weather updates too!",
    ),
];

/// Look up the canned answer for a normalized question.
pub fn lookup(key: &str) -> Option<&'static str> {
    FAQ_CATALOG.iter().find(|(q, _)| *q == key).map(|(_, a)| *a)
}

/// All recognized questions, in catalog order.
pub fn questions() -> impl Iterator<Item = &'static str> {
    FAQ_CATALOG.iter().map(|(q, _)| *q)
}
