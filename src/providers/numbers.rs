//! Phone number synthesis, one formatting strategy per country code

use rand::Rng;

/// Formatting strategy for generated numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberFormat {
    /// `+1 (AAA) BBB-CCCC`
    NorthAmerica,
    /// `+61 AAA BBB CCC`
    Australia,
    /// `+31 AA BBB CCCC`
    Netherlands,
    /// `+91 AAAAACCCC`
    India,
    /// `+<code> 555-CCCC` for any code without a dedicated format
    Generic(String),
}

impl NumberFormat {
    pub fn for_country(code: &str) -> Self {
        match code {
            "US" | "CA" => NumberFormat::NorthAmerica,
            "AU" => NumberFormat::Australia,
            "NL" => NumberFormat::Netherlands,
            "IN" => NumberFormat::India,
            other => NumberFormat::Generic(other.to_string()),
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self {
            NumberFormat::NorthAmerica => format!(
                "+1 ({}) {}-{}",
                rng.gen_range(200..1000),
                rng.gen_range(100..1000),
                rng.gen_range(1000..10000)
            ),
            NumberFormat::Australia => format!(
                "+61 {} {} {}",
                rng.gen_range(400..900),
                rng.gen_range(100..1000),
                rng.gen_range(100..1000)
            ),
            NumberFormat::Netherlands => format!(
                "+31 {} {} {}",
                rng.gen_range(10..100),
                rng.gen_range(100..1000),
                rng.gen_range(1000..10000)
            ),
            NumberFormat::India => format!(
                "+91 {}{}",
                rng.gen_range(70000..169999),
                rng.gen_range(1000..10000)
            ),
            NumberFormat::Generic(code) => {
                format!("+{} 555-{}", code, rng.gen_range(1000..10000))
            }
        }
    }

    /// `count` distinct numbers
    pub fn generate_distinct<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<String> {
        let mut numbers: Vec<String> = Vec::with_capacity(count);
        while numbers.len() < count {
            let candidate = self.generate(rng);
            if !numbers.contains(&candidate) {
                numbers.push(candidate);
            }
        }
        numbers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    fn sample(code: &str) -> String {
        let mut rng = StdRng::seed_from_u64(7);
        NumberFormat::for_country(code).generate(&mut rng)
    }

    #[test]
    fn formats_follow_country_patterns() {
        let cases = [
            ("US", r"^\+1 \([2-9][0-9]{2}\) [1-9][0-9]{2}-[1-9][0-9]{3}$"),
            ("CA", r"^\+1 \([2-9][0-9]{2}\) [1-9][0-9]{2}-[1-9][0-9]{3}$"),
            ("AU", r"^\+61 [4-8][0-9]{2} [1-9][0-9]{2} [1-9][0-9]{2}$"),
            ("NL", r"^\+31 [1-9][0-9] [1-9][0-9]{2} [1-9][0-9]{3}$"),
            ("IN", r"^\+91 [0-9]{5,6}[1-9][0-9]{3}$"),
            ("FR", r"^\+FR 555-[1-9][0-9]{3}$"),
        ];
        for (code, pattern) in cases {
            let number = sample(code);
            assert!(
                Regex::new(pattern).unwrap().is_match(&number),
                "{} produced {}",
                code,
                number
            );
        }
    }

    #[test]
    fn unknown_code_falls_back_to_generic() {
        assert_eq!(
            NumberFormat::for_country("DE"),
            NumberFormat::Generic("DE".into())
        );
    }

    #[test]
    fn distinct_numbers() {
        let mut rng = StdRng::seed_from_u64(1);
        let numbers = NumberFormat::Generic("ZZ".into()).generate_distinct(&mut rng, 8);
        let mut sorted = numbers.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 8);
    }
}
