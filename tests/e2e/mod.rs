// End-to-end tests for the dialogue audio API
//
// Each test gets its own router on an ephemeral port, backed by in-memory
// speech and chat providers, and talks to it through a real HTTP client.

mod test_dialogue_generate;
mod test_health;
mod test_voices;
