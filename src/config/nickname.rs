//! Random guest nickname generator.
//!
//! Produces nicknames like `QuietOtter42` for sessions without a configured
//! nickname.

use rand::RngExt;

const ADJECTIVES: &[&str] = &[
    "Quiet", "Brisk", "Amber", "Lucky", "Sunny", "Misty", "Rusty", "Dusky", "Witty", "Bold",
    "Calm", "Swift", "Merry", "Sly", "Tiny", "Keen",
];

const NOUNS: &[&str] = &[
    "Otter", "Heron", "Badger", "Finch", "Marten", "Stoat", "Wren", "Gecko", "Lemur", "Ibis",
    "Puffin", "Vole", "Kiwi", "Tapir", "Koi", "Yak",
];

/// Generate a random nickname of the form `<Adjective><Noun><NN>`.
pub fn generate_nickname() -> String {
    let mut rng = rand::rng();
    let adj = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let num: u8 = rng.random_range(0..100);
    format!("{}{}{}", adj, noun, num)
}
