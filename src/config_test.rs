#[cfg(test)]
mod tests {
    use super::super::config::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();

        assert_eq!(config.trader_name, "Alex");
        assert_eq!(config.starting_gold, 100);
        assert_eq!(config.carrying_capacity, 50);
        assert_eq!(config.travel_cost, 10);
        assert_eq!((config.min_price, config.max_price), (10, 100));
        assert_eq!(
            config.villages,
            ["Oakwood", "Maple Hill", "Pine Valley", "Willow Creek", "Cedar Town"]
        );
        assert_eq!(config.commodities, ["Wheat", "Iron", "Gold", "Spices", "Silk"]);
        assert_eq!(config.save_file, PathBuf::from("savegame.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = GameConfig::default();
        config.villages.clear();
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.commodities.clear();
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.min_price = 120;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.min_price = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.carrying_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.commodities.push("Olive Oil".to_string());
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.min_price = 50;
        config.max_price = 50;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "starting_gold": 250, "villages": ["Harbor"] }"#).unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(config.starting_gold, 250);
        assert_eq!(config.villages, ["Harbor"]);
        assert_eq!(config.carrying_capacity, 50);
        assert_eq!(config.commodities.len(), 5);
    }

    #[test]
    fn test_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "trader_name: Morgan\ncarrying_capacity: 75\ncommodities:\n  - Salt\n  - Wool\n",
        )
        .unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(config.trader_name, "Morgan");
        assert_eq!(config.carrying_capacity, 75);
        assert_eq!(config.commodities, ["Salt", "Wool"]);
    }

    #[test]
    fn test_config_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GameConfig::load_from_file(&dir.path().join("missing.json")).is_err());

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(GameConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = GameConfig::default();
        config.travel_cost = 15;

        config.save_to_file(&path).unwrap();
        assert_eq!(GameConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_config_display() {
        let display = format!("{}", GameConfig::default());
        assert!(display.contains("Trader: Alex"));
        assert!(display.contains("Travel cost: 10 gold"));
        assert!(display.contains("Oakwood, Maple Hill"));
    }
}
