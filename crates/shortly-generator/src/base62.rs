use crate::Generator;
use shortly_core::ShortCode;
use typed_builder::TypedBuilder;

/// The 62 characters a generated code is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Random short code generator over `[a-zA-Z0-9]`.
///
/// Characters are drawn uniformly from the thread-local CSPRNG so codes
/// cannot be predicted from earlier ones.
#[derive(Debug, Clone, TypedBuilder)]
pub struct Base62Generator {
    #[builder(default = DEFAULT_CODE_LENGTH)]
    length: usize,
}

impl Base62Generator {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for Base62Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for Base62Generator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code: String = std::iter::repeat_with(|| {
            ALPHABET[rand::random_range(0..ALPHABET.len())] as char
        })
        .take(self.length)
        .collect();
        ShortCode::new(code)
    }
}
