//! Default account names
//!
//! When creating an account the user is offered a random two-word name
//! such as "Happy Penguin". The name is only a suggestion; uniqueness is
//! still enforced by the store.

use rand::seq::IndexedRandom;

const FIRST_WORDS: [&str; 8] = [
    "Silly", "Happy", "Angry", "Crazy", "Funny", "Giggly", "Cheerful", "Playful",
];

const SECOND_WORDS: [&str; 8] = [
    "Cat", "Dog", "Dinosaur", "Elephant", "Monkey", "Giraffe", "Penguin", "Cockroach",
];

/// Source of default account names
pub trait NameGenerator {
    fn generate_default_name(&mut self) -> String;
}

/// Random "Adjective Animal" names
#[derive(Debug, Default, Clone, Copy)]
pub struct FunnyNameGenerator;

impl NameGenerator for FunnyNameGenerator {
    fn generate_default_name(&mut self) -> String {
        let mut rng = rand::rng();
        let first = FIRST_WORDS.choose(&mut rng).copied().unwrap_or("Happy");
        let second = SECOND_WORDS.choose(&mut rng).copied().unwrap_or("Cat");
        format!("{} {}", first, second)
    }
}

/// Always suggests the same name
#[derive(Debug, Clone)]
pub struct FixedNameGenerator(pub String);

impl NameGenerator for FixedNameGenerator {
    fn generate_default_name(&mut self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funny_name_uses_word_lists() {
        let mut generator = FunnyNameGenerator;
        for _ in 0..20 {
            let name = generator.generate_default_name();
            let (first, second) = name.split_once(' ').unwrap();
            assert!(FIRST_WORDS.contains(&first));
            assert!(SECOND_WORDS.contains(&second));
        }
    }

    #[test]
    fn test_funny_name_is_storable() {
        let name = FunnyNameGenerator.generate_default_name();
        assert!(crate::types::validate_text_field("account name", &name).is_ok());
    }

    #[test]
    fn test_fixed_name() {
        let mut generator = FixedNameGenerator("Main".to_string());
        assert_eq!(generator.generate_default_name(), "Main");
    }
}
