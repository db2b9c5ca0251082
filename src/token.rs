//! Secret token generation for deployment secrets.

use rand::Rng;

/// Printable ASCII with whitespace, backslash, and both quote characters
/// removed, so a token never breaks naive quoting in YAML or TOML values.
fn charset() -> Vec<char> {
    (0x21u8..0x7f)
        .map(char::from)
        .filter(|c| !matches!(c, '\\' | '\'' | '"'))
        .collect()
}

/// Generate a random token of exactly `length` characters.
///
/// Characters are drawn independently and uniformly from the restricted
/// printable set using the thread-local CSPRNG.
pub fn generate_token(length: usize) -> String {
    let charset = charset();
    let mut rng = rand::rng();

    (0..length).map(|_| charset[rng.random_range(0..charset.len())]).collect()
}
