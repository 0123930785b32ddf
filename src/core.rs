use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commodity {
    pub name: String,
    /// Zero until the first call to [`Village::generate_prices`].
    pub price: u32,
}

impl Commodity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Village {
    pub name: String,
    pub commodities: Vec<Commodity>,
}

impl Village {
    pub fn new(name: impl Into<String>, commodity_names: &[String]) -> Self {
        Self {
            name: name.into(),
            commodities: commodity_names.iter().map(Commodity::new).collect(),
        }
    }

    /// Draw a fresh price for every commodity, uniformly and independently.
    pub fn generate_prices<R: Rng + ?Sized>(&mut self, rng: &mut R, range: RangeInclusive<u32>) {
        for commodity in self.commodities.iter_mut() {
            commodity.price = rng.random_range(range.clone());
        }
    }

    pub fn commodity(&self, index: usize) -> Option<&Commodity> {
        self.commodities.get(index)
    }

    pub fn commodity_mut(&mut self, name: &str) -> Option<&mut Commodity> {
        self.commodities.iter_mut().find(|c| c.name == name)
    }

    /// Numbered `1. Wheat - 42 gold` lines, one per commodity.
    pub fn price_list(&self) -> String {
        let mut out = String::new();
        for (i, commodity) in self.commodities.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} - {} gold\n",
                i + 1,
                commodity.name,
                commodity.price
            ));
        }
        out
    }
}

impl fmt::Display for Village {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Village: {}", self.name)?;
        writeln!(f, "Commodities:")?;
        writeln!(f, "{}", self.price_list())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trader {
    pub name: String,
    pub gold: u32,
    pub carrying_capacity: u32,
    /// Sorted by commodity name; entries are never zero.
    pub inventory: BTreeMap<String, u32>,
}

impl Trader {
    pub fn new(name: impl Into<String>, gold: u32, carrying_capacity: u32) -> Self {
        Self {
            name: name.into(),
            gold,
            carrying_capacity,
            inventory: BTreeMap::new(),
        }
    }

    pub fn current_load(&self) -> u32 {
        self.inventory
            .values()
            .fold(0u32, |total, quantity| total.saturating_add(*quantity))
    }

    pub fn quantity_of(&self, commodity: &str) -> u32 {
        self.inventory.get(commodity).copied().unwrap_or(0)
    }

    pub fn free_capacity(&self) -> u32 {
        self.carrying_capacity.saturating_sub(self.current_load())
    }
}

impl fmt::Display for Trader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trader: {}", self.name)?;
        writeln!(f, "Gold: {}", self.gold)?;
        writeln!(
            f,
            "Current Load: {}/{}",
            self.current_load(),
            self.carrying_capacity
        )?;
        writeln!(f, "Inventory:")?;
        for (name, quantity) in &self.inventory {
            writeln!(f, "  {}: {}", name, quantity)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn names() -> Vec<String> {
        ["Wheat", "Iron", "Gold", "Spices", "Silk"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_current_load_sums_inventory() {
        let mut trader = Trader::new("Alex", 100, 50);
        assert_eq!(trader.current_load(), 0);

        trader.inventory.insert("Wheat".to_string(), 5);
        trader.inventory.insert("Silk".to_string(), 7);
        assert_eq!(trader.current_load(), 12);
        assert_eq!(trader.free_capacity(), 38);
    }

    #[test]
    fn test_quantity_of_unknown_commodity_is_zero() {
        let trader = Trader::new("Alex", 100, 50);
        assert_eq!(trader.quantity_of("Iron"), 0);
        assert!(trader.inventory.is_empty(), "lookup must not insert");
    }

    #[test]
    fn test_generate_prices_stays_in_range() {
        let mut village = Village::new("Oakwood", &names());
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            village.generate_prices(&mut rng, 10..=100);
            for commodity in &village.commodities {
                assert!(
                    (10..=100).contains(&commodity.price),
                    "{} priced at {}",
                    commodity.name,
                    commodity.price
                );
            }
        }
    }

    #[test]
    fn test_generate_prices_reaches_both_bounds() {
        let mut village = Village::new("Oakwood", &names());
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen_min = false;
        let mut seen_max = false;

        for _ in 0..2000 {
            village.generate_prices(&mut rng, 10..=100);
            seen_min |= village.commodities.iter().any(|c| c.price == 10);
            seen_max |= village.commodities.iter().any(|c| c.price == 100);
        }

        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_village_display_lists_numbered_prices() {
        let mut village = Village::new("Cedar Town", &names());
        village.commodity_mut("Wheat").unwrap().price = 12;
        village.commodity_mut("Silk").unwrap().price = 99;

        let display = format!("{}", village);
        assert!(display.starts_with("Village: Cedar Town\nCommodities:\n"));
        assert!(display.contains("1. Wheat - 12 gold\n"));
        assert!(display.contains("5. Silk - 99 gold\n"));
    }

    #[test]
    fn test_trader_display() {
        let mut trader = Trader::new("Alex", 80, 50);
        trader.inventory.insert("Wheat".to_string(), 2);
        trader.inventory.insert("Iron".to_string(), 1);

        let display = format!("{}", trader);
        assert_eq!(
            display,
            "Trader: Alex\nGold: 80\nCurrent Load: 3/50\nInventory:\n  Iron: 1\n  Wheat: 2\n\n"
        );
    }
}
