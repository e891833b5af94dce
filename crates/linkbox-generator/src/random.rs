use crate::Generator;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use linkbox_core::shortcode::CODE_LENGTH;
use linkbox_core::ShortCode;
use rand::Rng;

/// Draws random bytes from the thread-local CSPRNG and encodes them as
/// URL-safe base64.
///
/// Six bytes encode to eight characters; the first [`CODE_LENGTH`] are kept,
/// giving 64^6 possible codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let mut bytes = [0u8; CODE_LENGTH];
        rand::rng().fill(&mut bytes);
        let encoded = URL_SAFE_NO_PAD.encode(bytes);
        ShortCode::new_unchecked(&encoded[..CODE_LENGTH])
    }
}
