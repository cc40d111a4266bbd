//! Canned catalog data served by the mock provider

use crate::wizard::state::{Country, Money, Plan};

pub fn countries() -> Vec<Country> {
    vec![
        Country::new("US", "USA"),
        Country::new("CA", "Canada"),
        Country::new("AU", "Australia"),
        Country::new("NL", "Netherlands"),
        Country::new("IN", "India"),
    ]
}

pub fn plans() -> Vec<Plan> {
    vec![
        plan("basic", "Basic", 5, &["100 mins", "SMS included"]),
        plan("pro", "Pro", 12, &["500 mins", "SMS + MMS"]),
        plan("premium", "Premium", 25, &["Unlimited", "Priority support"]),
    ]
}

fn plan(id: &str, name: &str, price: u64, features: &[&str]) -> Plan {
    Plan {
        id: id.to_string(),
        name: name.to_string(),
        price: Money::from_units(price),
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_ids_are_unique() {
        let plans = plans();
        let mut ids: Vec<_> = plans.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), plans.len());
    }

    #[test]
    fn pro_costs_twelve() {
        let pro = plans().into_iter().find(|p| p.id == "pro").unwrap();
        assert_eq!(pro.price, Money::from_units(12));
        assert_eq!(pro.summary(), "Pro ($12/mo)");
    }
}
