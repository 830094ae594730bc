//! Illustrative calorie pie chart.
//!
//! The chart is drawn from a fixed nutrient table and does not depend on the
//! model's answer. It exists to show what a macro breakdown looks like; the
//! numbers are placeholders.

use serde::Serialize;

const CENTER_X: f64 = 260.0;
const CENTER_Y: f64 = 210.0;
const RADIUS: f64 = 150.0;
const LABEL_DISTANCE: f64 = 1.12;
const PERCENT_DISTANCE: f64 = 0.6;
const START_ANGLE_DEG: f64 = 90.0;

pub const CHART_WIDTH: u32 = 520;
pub const CHART_HEIGHT: u32 = 420;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Macronutrient {
    Protein,
    Carbohydrates,
    Fats,
    Fiber,
    Sugar,
}

impl Macronutrient {
    pub fn label(self) -> &'static str {
        match self {
            Macronutrient::Protein => "Protein",
            Macronutrient::Carbohydrates => "Carbohydrates",
            Macronutrient::Fats => "Fats",
            Macronutrient::Fiber => "Fiber",
            Macronutrient::Sugar => "Sugar",
        }
    }

    /// kcal per gram.
    pub fn energy_factor(self) -> f64 {
        match self {
            Macronutrient::Protein | Macronutrient::Carbohydrates | Macronutrient::Sugar => 4.0,
            Macronutrient::Fats => 9.0,
            // approximation, most fiber is only partly fermented
            Macronutrient::Fiber => 2.0,
        }
    }
}

/// Grams per nutrient, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientTable {
    entries: Vec<(Macronutrient, u32)>,
}

impl NutrientTable {
    pub fn new(entries: Vec<(Macronutrient, u32)>) -> Self {
        Self { entries }
    }

    /// The hardcoded example meal used for every chart.
    pub fn placeholder() -> Self {
        Self::new(vec![
            (Macronutrient::Protein, 25),
            (Macronutrient::Carbohydrates, 50),
            (Macronutrient::Fats, 15),
            (Macronutrient::Fiber, 8),
            (Macronutrient::Sugar, 10),
        ])
    }

    pub fn entries(&self) -> &[(Macronutrient, u32)] {
        &self.entries
    }
}

const SLICE_COLORS: [&str; 5] = ["#ff9999", "#66b3ff", "#99ff99", "#ffcc99", "#c2c2f0"];

#[derive(Debug, Clone, Serialize)]
pub struct ChartSlice {
    pub nutrient: Macronutrient,
    pub label: &'static str,
    pub grams: u32,
    pub kcal: f64,
    pub percent: f64,
    pub color: &'static str,
    #[serde(skip)]
    pub start_deg: f64,
    #[serde(skip)]
    pub end_deg: f64,
}

impl ChartSlice {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }

    /// SVG path for the wedge, drawn counter-clockwise from `start_deg`.
    pub fn svg_path(&self) -> String {
        let sweep = self.end_deg - self.start_deg;
        if sweep <= 0.0 {
            return String::new();
        }
        if sweep >= 359.999 {
            return format!(
                "M {cx:.2} {top:.2} A {r:.2} {r:.2} 0 1 0 {cx:.2} {bottom:.2} A {r:.2} {r:.2} 0 1 0 {cx:.2} {top:.2} Z",
                cx = CENTER_X,
                top = CENTER_Y - RADIUS,
                bottom = CENTER_Y + RADIUS,
                r = RADIUS,
            );
        }

        let (x0, y0) = point_at(self.start_deg, RADIUS);
        let (x1, y1) = point_at(self.end_deg, RADIUS);
        let large_arc = u8::from(sweep > 180.0);
        // sweep-flag 0 is counter-clockwise in SVG's y-down space
        format!(
            "M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 0 {x1:.2} {y1:.2} Z",
            cx = CENTER_X,
            cy = CENTER_Y,
            r = RADIUS,
        )
    }

    fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }

    pub fn label_x(&self) -> String {
        format!("{:.2}", point_at(self.mid_deg(), RADIUS * LABEL_DISTANCE).0)
    }

    pub fn label_y(&self) -> String {
        format!("{:.2}", point_at(self.mid_deg(), RADIUS * LABEL_DISTANCE).1)
    }

    pub fn label_anchor(&self) -> &'static str {
        let cos = self.mid_deg().to_radians().cos();
        if cos > 0.1 {
            "start"
        } else if cos < -0.1 {
            "end"
        } else {
            "middle"
        }
    }

    pub fn percent_x(&self) -> String {
        format!("{:.2}", point_at(self.mid_deg(), RADIUS * PERCENT_DISTANCE).0)
    }

    pub fn percent_y(&self) -> String {
        format!("{:.2}", point_at(self.mid_deg(), RADIUS * PERCENT_DISTANCE).1)
    }
}

fn point_at(angle_deg: f64, radius: f64) -> (f64, f64) {
    let theta = angle_deg.to_radians();
    (CENTER_X + radius * theta.cos(), CENTER_Y - radius * theta.sin())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieChart {
    pub slices: Vec<ChartSlice>,
    pub total_kcal: f64,
    pub illustrative: bool,
}

impl CalorieChart {
    pub fn from_table(table: &NutrientTable) -> Self {
        let kcal: Vec<f64> = table
            .entries()
            .iter()
            .map(|(nutrient, grams)| f64::from(*grams) * nutrient.energy_factor())
            .collect();
        let total_kcal: f64 = kcal.iter().sum();

        let mut angle = START_ANGLE_DEG;
        let slices = table
            .entries()
            .iter()
            .zip(kcal)
            .enumerate()
            .map(|(index, (&(nutrient, grams), kcal))| {
                let fraction = if total_kcal > 0.0 { kcal / total_kcal } else { 0.0 };
                let start_deg = angle;
                angle += fraction * 360.0;
                ChartSlice {
                    nutrient,
                    label: nutrient.label(),
                    grams,
                    kcal,
                    percent: fraction * 100.0,
                    color: SLICE_COLORS[index % SLICE_COLORS.len()],
                    start_deg,
                    end_deg: angle,
                }
            })
            .collect();

        Self {
            slices,
            total_kcal,
            illustrative: true,
        }
    }

    pub fn placeholder() -> Self {
        Self::from_table(&NutrientTable::placeholder())
    }

    pub fn total_label(&self) -> String {
        format!("Total Estimated Calories: {:.2} kcal", self.total_kcal)
    }

    pub fn width(&self) -> u32 {
        CHART_WIDTH
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kcal_of(chart: &CalorieChart, nutrient: Macronutrient) -> f64 {
        chart
            .slices
            .iter()
            .find(|slice| slice.nutrient == nutrient)
            .map(|slice| slice.kcal)
            .expect("nutrient present")
    }

    #[test]
    fn placeholder_calories_match_energy_factors() {
        let chart = CalorieChart::placeholder();

        assert_eq!(kcal_of(&chart, Macronutrient::Protein), 100.0);
        assert_eq!(kcal_of(&chart, Macronutrient::Carbohydrates), 200.0);
        assert_eq!(kcal_of(&chart, Macronutrient::Fats), 135.0);
        assert_eq!(kcal_of(&chart, Macronutrient::Fiber), 16.0);
        assert_eq!(kcal_of(&chart, Macronutrient::Sugar), 40.0);
        assert_eq!(chart.total_kcal, 491.0);
        assert_eq!(chart.total_label(), "Total Estimated Calories: 491.00 kcal");
    }

    #[test]
    fn placeholder_is_identical_every_time() {
        let first = serde_json::to_value(CalorieChart::placeholder()).unwrap();
        let second = serde_json::to_value(CalorieChart::placeholder()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn percentages_use_one_decimal() {
        let chart = CalorieChart::placeholder();
        let labels: Vec<String> = chart.slices.iter().map(ChartSlice::percent_label).collect();
        assert_eq!(labels, ["20.4%", "40.7%", "27.5%", "3.3%", "8.1%"]);
    }

    #[test]
    fn slices_cover_the_full_circle_from_the_top() {
        let chart = CalorieChart::placeholder();
        let first = chart.slices.first().unwrap();
        let last = chart.slices.last().unwrap();

        assert_eq!(first.start_deg, 90.0);
        assert!((last.end_deg - 450.0).abs() < 1e-9);
        for pair in chart.slices.windows(2) {
            assert_eq!(pair[0].end_deg, pair[1].start_deg);
        }
        assert!(first.svg_path().starts_with("M 260.00 210.00 L 260.00 60.00 A"));
    }

    #[test]
    fn large_arc_flag_follows_slice_size() {
        let table = NutrientTable::new(vec![
            (Macronutrient::Fats, 10),
            (Macronutrient::Protein, 1),
        ]);
        let chart = CalorieChart::from_table(&table);

        assert!(chart.slices[0].svg_path().contains(" 0 1 0 "));
        assert!(chart.slices[1].svg_path().contains(" 0 0 0 "));
    }

    #[test]
    fn single_nutrient_draws_a_whole_disc() {
        let chart = CalorieChart::from_table(&NutrientTable::new(vec![(Macronutrient::Fiber, 3)]));
        let path = chart.slices[0].svg_path();

        assert_eq!(chart.slices[0].percent, 100.0);
        assert_eq!(path.matches(" A ").count(), 2);
    }

    #[test]
    fn empty_table_has_no_wedges() {
        let chart = CalorieChart::from_table(&NutrientTable::new(vec![(Macronutrient::Sugar, 0)]));
        assert_eq!(chart.total_kcal, 0.0);
        assert_eq!(chart.slices[0].percent, 0.0);
        assert!(chart.slices[0].svg_path().is_empty());
    }

    #[test]
    fn labels_sit_on_the_side_of_their_wedge() {
        let chart = CalorieChart::placeholder();
        // Protein spans the upper-left quadrant, Fats the right half.
        assert_eq!(chart.slices[0].label_anchor(), "end");
        assert_eq!(chart.slices[2].label_anchor(), "start");
    }
}
