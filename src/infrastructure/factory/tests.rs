//! Tests for factory functions.
//!
//! Verifies that factory functions correctly build components based on
//! configuration settings.

use rust_decimal_macros::dec;

use crate::domain::error::DomainError;
use crate::domain::{NoArbitrage, Quote};
use crate::error::{ConfigError, Error};
use crate::infrastructure::config::allocation::FeeModelKind;
use crate::infrastructure::config::embedding::EmbeddingProvider;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::{allocation, embedding, matching};

fn minimal_config() -> Config {
    Config::parse_toml("").expect("empty config should parse")
}

// ---------------------------------------------------------------------------
// Embedding Factory Tests
// ---------------------------------------------------------------------------

mod embedding_factory {
    use super::*;

    #[test]
    fn defaults_to_hashing_provider() {
        let embedder = embedding::build_embedder(&minimal_config()).unwrap();
        assert_eq!(embedder.name(), "hashing");
    }

    #[test]
    fn openai_requires_api_key() {
        let saved = std::env::var("OPENAI_API_KEY").ok();
        std::env::remove_var("OPENAI_API_KEY");

        let mut config = minimal_config();
        config.embedding.provider = EmbeddingProvider::OpenAi;
        let result = embedding::build_embedder(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField {
                field: "OPENAI_API_KEY"
            }))
        ));

        if let Some(key) = saved {
            std::env::set_var("OPENAI_API_KEY", key);
        }
    }

    #[test]
    fn matching_service_uses_configured_settings() {
        let mut config = minimal_config();
        config.matching.rarity_ceiling = 12;
        let service = matching::build_matching_service(&config).unwrap();
        assert_eq!(service.settings().rarity_ceiling, 12);
    }
}

// ---------------------------------------------------------------------------
// Allocation Factory Tests
// ---------------------------------------------------------------------------

mod allocation_factory {
    use super::*;

    #[test]
    fn fee_model_follows_config() {
        let mut config = minimal_config();
        assert_eq!(allocation::build_fee_model(&config).name(), "convexity");

        config.allocation.fee_model = FeeModelKind::None;
        assert_eq!(allocation::build_fee_model(&config).name(), "none");
    }

    #[test]
    fn stake_override_wins() {
        let allocator = allocation::build_allocator(&minimal_config(), Some(dec!(50))).unwrap();
        assert_eq!(allocator.stake(), dec!(50));
    }

    #[test]
    fn non_positive_override_is_rejected() {
        let result = allocation::build_allocator(&minimal_config(), Some(dec!(-1)));
        assert!(matches!(
            result,
            Err(Error::Domain(DomainError::NonPositiveStake { .. }))
        ));
    }

    #[test]
    fn configured_fee_can_erase_an_edge() {
        let quote = Quote::new(dec!(0.55), dec!(0.50), dec!(0.49), dec!(0.60));

        let charged = allocation::build_allocator(&minimal_config(), None).unwrap();
        assert_eq!(
            charged.allocate(&quote).reason(),
            Some(NoArbitrage::FeesExceedEdge)
        );

        let mut config = minimal_config();
        config.allocation.fee_model = FeeModelKind::None;
        let free = allocation::build_allocator(&config, None).unwrap();
        assert!(free.allocate(&quote).is_found());
    }
}
