use tempfile::{tempdir, TempDir};
use utm_builder::app_state::{AppState, BuildOptions};
use utm_builder::history::History;
use utm_builder::presets::{JsonPresetStore, PresetStore};
use utm_builder::*;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestUrls;
    impl TestUrls {
        const BARE_PAGE: &'static str = "example.com/page";
        const WITH_EXISTING: &'static str = "https://example.com/?existing=1";
        const WITH_FRAGMENT: &'static str = "https://shop.example.com/sale?ref=home#top";
        const NO_HOST: &'static str = "utm_source=foo";
        const PATH_ONLY: &'static str = "/landing";
    }

    fn setup_temp_dir() -> TempDir {
        tempdir().unwrap()
    }

    fn default_pairs() -> ParameterSet {
        [("utm_source", "x"), ("utm_medium", "y"), ("utm_campaign", "z")]
            .into_iter()
            .collect()
    }

    fn build_default(base: &str, pairs: &ParameterSet) -> Result<String, UtmError> {
        build_utm_url(
            base,
            pairs,
            &NormalizationConfig::default(),
            &MergePolicy::default(),
        )
    }

    fn query_keys(url: &str) -> Vec<String> {
        url::Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, _)| k.into_owned())
            .collect()
    }

    #[test]
    fn test_scheme_inference() {
        assert_eq!(
            build_default(TestUrls::BARE_PAGE, &default_pairs()).unwrap(),
            "https://example.com/page?utm_source=x&utm_medium=y&utm_campaign=z"
        );
    }

    #[test]
    fn test_base_url_errors() {
        assert_eq!(
            build_default("", &default_pairs()),
            Err(UtmError::EmptyBaseUrl)
        );
        assert!(matches!(
            build_default(TestUrls::NO_HOST, &default_pairs()),
            Err(UtmError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            build_default(TestUrls::PATH_ONLY, &default_pairs()),
            Err(UtmError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_merge_disabled_regardless_of_override() {
        for override_existing in [true, false] {
            let policy = MergePolicy {
                merge_existing: false,
                override_existing,
            };
            let url = build_utm_url(
                TestUrls::WITH_EXISTING,
                &default_pairs(),
                &NormalizationConfig::default(),
                &policy,
            )
            .unwrap();
            assert!(!query_keys(&url).contains(&"existing".to_string()));
        }
    }

    #[test]
    fn test_blank_values_never_emitted() {
        let mut pairs = default_pairs();
        pairs.insert("utm_term", "  ");
        pairs.insert("utm_content", "");

        let url = build_default(TestUrls::WITH_FRAGMENT, &pairs).unwrap();
        let keys = query_keys(&url);
        assert!(!keys.contains(&"utm_term".to_string()));
        assert!(!keys.contains(&"utm_content".to_string()));
        assert!(url.ends_with("#top"));
    }

    #[test]
    fn test_input_pairs_untouched() {
        let pairs: ParameterSet = [("UTM Source", " Paid Search ")].into_iter().collect();
        let before = pairs.clone();
        build_default(TestUrls::BARE_PAGE, &pairs).unwrap();
        assert_eq!(pairs, before);
    }

    #[test]
    fn test_rebuild_is_noop() {
        let policy = MergePolicy {
            merge_existing: true,
            override_existing: true,
        };
        let config = NormalizationConfig {
            force_lower: true,
            space_mode: SpaceMode::Keep,
        };

        let mut pairs = default_pairs();
        pairs.insert("utm_campaign", "Spring Sale");

        let first = build_utm_url(TestUrls::WITH_FRAGMENT, &pairs, &config, &policy).unwrap();
        let second = build_utm_url(&first, &ParameterSet::new(), &config, &policy).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("utm_campaign=spring+sale"));
    }

    #[test]
    fn test_normalize_pair_exported() {
        let config = NormalizationConfig {
            force_lower: true,
            space_mode: SpaceMode::Dash,
        };
        let (key, value) = normalize_pair("Utm_Campaign", Some("Black Friday"), &config);
        assert_eq!(key, "utm_campaign");
        assert_eq!(value.as_deref(), Some("black-friday"));
    }

    #[test]
    fn test_app_state_with_json_store() {
        let temp_dir = setup_temp_dir();
        let presets_path = temp_dir.path().join("presets.json");
        let history_path = temp_dir.path().join("history.json");

        let mut app = AppState::new(
            JsonPresetStore::new(&presets_path),
            History::default(),
            BuildOptions::default(),
        )
        .unwrap();

        app.form.base_url = TestUrls::BARE_PAGE.to_string();
        app.form.set_field("utm_source", "Newsletter");
        app.form.set_field("utm_medium", "email");
        app.form.set_field("utm_campaign", "Weekly Digest");
        app.save_preset("weekly").unwrap();

        let url = app.generate(false).unwrap();
        assert_eq!(
            url,
            "https://example.com/page?utm_source=newsletter&utm_medium=email&utm_campaign=weekly_digest"
        );
        app.history().save(&history_path).unwrap();

        let presets = JsonPresetStore::new(&presets_path).load().unwrap();
        assert_eq!(
            presets["weekly"].get("utm_campaign"),
            Some("Weekly Digest")
        );

        let history = History::load(&history_path, 20).unwrap();
        assert_eq!(history.entries()[0].url, url);

        let csv_path = temp_dir.path().join("history.csv");
        history.export_csv(&csv_path).unwrap();
        let exported = std::fs::read_to_string(&csv_path).unwrap();
        assert!(exported.starts_with("url,generated_at\n"));
        assert!(exported.contains(&url));
    }
}
