use serde::Serialize;

use crate::timeseries::series::{PriceSeries, RegionSeries};
use crate::timeseries::utility::{mean, pct_change};

/// Months between the two points of a year-over-year comparison.
const YEAR: usize = 12;

/// One row of `median_sale_price_analysis.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRow {
    pub state: String,
    pub latest_price: Option<f64>,
    pub mom_growth: Option<f64>,
    pub yoy_growth: Option<f64>,
}

/// Month-over-month and year-over-year growth for the final month, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Growth {
    pub mom: Option<f64>,
    pub yoy: Option<f64>,
}

/// Percent change into the last month from one month and twelve months before it.
pub fn growth(series: &RegionSeries) -> Growth {
    let n = series.prices.len();
    let at = |back: usize| -> Option<f64> {
        n.checked_sub(back + 1)
            .and_then(|i| series.prices.get(i).copied().flatten())
    };

    Growth {
        mom: pct_change(at(1), at(0)),
        yoy: pct_change(at(YEAR), at(0)),
    }
}

/// Latest price and growth for every region, in input order.
pub fn analysis_rows(series: &PriceSeries) -> Vec<AnalysisRow> {
    series
        .regions
        .iter()
        .map(|r| {
            let g = growth(r);
            AnalysisRow {
                state: r.region.clone(),
                latest_price: r.latest(),
                mom_growth: g.mom,
                yoy_growth: g.yoy,
            }
        })
        .collect()
}

/// Headline statistics over the final month of a [`PriceSeries`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesSummary {
    pub time_period: String,
    pub number_of_states: usize,
    pub average_price: Option<f64>,
    pub maximum_price: Option<f64>,
    pub minimum_price: Option<f64>,
}

pub fn summarize(series: &PriceSeries) -> TimeSeriesSummary {
    let time_period = match (series.months.first(), series.months.last()) {
        (Some(start), Some(end)) => {
            format!("{} to {}", start.format("%Y-%m"), end.format("%Y-%m"))
        }
        _ => String::new(),
    };

    let latest: Vec<f64> = series.regions.iter().filter_map(RegionSeries::latest).collect();

    let (average_price, maximum_price, minimum_price) = if latest.is_empty() {
        (None, None, None)
    } else {
        (
            Some(mean(&latest)),
            latest.iter().copied().reduce(f64::max),
            latest.iter().copied().reduce(f64::min),
        )
    };

    TimeSeriesSummary {
        time_period,
        number_of_states: series.regions.len(),
        average_price,
        maximum_price,
        minimum_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn region(name: &str, prices: Vec<Option<f64>>) -> RegionSeries {
        RegionSeries {
            region: name.to_string(),
            prices,
        }
    }

    fn months(n: u32) -> Vec<NaiveDate> {
        (0..n)
            .map(|i| NaiveDate::from_ymd_opt(2024 + (i / 12) as i32, i % 12 + 1, 1).unwrap())
            .collect()
    }

    #[test]
    fn test_growth_month_and_year() {
        let mut prices: Vec<Option<f64>> = vec![Some(100.0); 13];
        prices[11] = Some(200.0);
        prices[12] = Some(250.0);

        let g = growth(&region("Alabama", prices));
        assert_eq!(g.mom, Some(25.0));
        assert_eq!(g.yoy, Some(150.0));
    }

    #[test]
    fn test_growth_short_series() {
        let g = growth(&region("Alabama", vec![Some(100.0), Some(110.0)]));
        assert!((g.mom.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(g.yoy, None);

        let g = growth(&region("Alabama", vec![Some(100.0)]));
        assert_eq!(g, Growth::default());
    }

    #[test]
    fn test_growth_missing_operand() {
        let g = growth(&region("Alabama", vec![None, Some(110.0)]));
        assert_eq!(g.mom, None);
    }

    #[test]
    fn test_summarize() {
        let series = PriceSeries {
            months: months(14),
            regions: vec![
                region("Alabama", vec![Some(100.0); 14]),
                region("Alaska", vec![Some(300.0); 14]),
                region("Nowhere", vec![None; 14]),
            ],
        };

        let summary = summarize(&series);
        assert_eq!(summary.time_period, "2024-01 to 2025-02");
        assert_eq!(summary.number_of_states, 3);
        assert_eq!(summary.average_price, Some(200.0));
        assert_eq!(summary.maximum_price, Some(300.0));
        assert_eq!(summary.minimum_price, Some(100.0));
    }

    #[test]
    fn test_analysis_rows() {
        let series = PriceSeries {
            months: months(2),
            regions: vec![region("Alabama", vec![Some(200.0), Some(250.0)])],
        };
        let rows = analysis_rows(&series);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].state, "Alabama");
        assert_eq!(rows[0].latest_price, Some(250.0));
        assert_eq!(rows[0].mom_growth, Some(25.0));
        assert_eq!(rows[0].yoy_growth, None);
    }
}
