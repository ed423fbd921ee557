//! One-sentence summaries of where a region ranks for each metric.

use crate::report::rank::NOT_AVAILABLE;

const SCOPE: &str = "in the nation among states, DC, and Puerto Rico";
const UNKNOWN_DATE: &str = "an unknown date";

fn unavailable(name: &str, label: &str) -> String {
    format!("{} has an N/A {}.", name, label)
}

/// `1st` reads better as a word in some sentences ("the single highest").
fn lead_rank<'a>(rank: &'a str, first: &'a str) -> &'a str {
    if rank == "1st" { first } else { rank }
}

pub fn population(name: &str, rank: &str) -> String {
    if rank == NOT_AVAILABLE {
        return unavailable(name, "population rank");
    }
    format!(
        "{} is {} in the nation in population among states, DC, and Puerto Rico.",
        name, rank
    )
}

pub fn median_household_income(name: &str, rank: &str) -> String {
    if rank == NOT_AVAILABLE {
        return unavailable(name, "median household income rank");
    }
    format!(
        "{} is {} in the nation in median household income among states, DC, and Puerto Rico.",
        name,
        lead_rank(rank, "the highest")
    )
}

pub fn median_sale_price(name: &str, rank: &str, data_date: Option<&str>) -> String {
    if rank == NOT_AVAILABLE {
        return unavailable(name, "median sale price rank");
    }
    format!(
        "{} has the {} highest median sale price on homes {}, according to Redfin data from {}.",
        name,
        lead_rank(rank, "single"),
        SCOPE,
        data_date.unwrap_or(UNKNOWN_DATE)
    )
}

pub fn house_affordability_ratio(name: &str, rank: &str, data_date: Option<&str>) -> String {
    if rank == NOT_AVAILABLE {
        return unavailable(name, "house affordability ratio");
    }
    format!(
        "{} has the {} lowest house affordability ratio {}, according to Redfin data from {}.",
        name,
        lead_rank(rank, "single"),
        SCOPE,
        data_date.unwrap_or(UNKNOWN_DATE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_blurb() {
        assert_eq!(
            population("California", "1st"),
            "California is 1st in the nation in population among states, DC, and Puerto Rico."
        );
    }

    #[test]
    fn test_income_blurb_highest() {
        assert_eq!(
            median_household_income("Maryland", "1st"),
            "Maryland is the highest in the nation in median household income among states, DC, and Puerto Rico."
        );
        assert!(median_household_income("Ohio", "30th").contains(" is 30th in the nation"));
    }

    #[test]
    fn test_sale_price_blurb() {
        assert_eq!(
            median_sale_price("Hawaii", "1st", Some("March 2025")),
            "Hawaii has the single highest median sale price on homes in the nation among states, \
             DC, and Puerto Rico, according to Redfin data from March 2025."
        );
        assert!(median_sale_price("Ohio", "40th", None).ends_with("from an unknown date."));
    }

    #[test]
    fn test_affordability_blurb() {
        assert_eq!(
            house_affordability_ratio("Iowa", "2nd", Some("March 2025")),
            "Iowa has the 2nd lowest house affordability ratio in the nation among states, \
             DC, and Puerto Rico, according to Redfin data from March 2025."
        );
    }

    #[test]
    fn test_not_available() {
        assert_eq!(
            house_affordability_ratio("Guam", "N/A", Some("March 2025")),
            "Guam has an N/A house affordability ratio."
        );
        assert_eq!(population("Guam", "N/A"), "Guam has an N/A population rank.");
    }
}
