use crate::display::interface::Display;
use crate::image_classifier::interface::{Classification, PredictionResult};
use std::error::Error;

pub struct DisplayConsole {
    width: usize,
}

impl DisplayConsole {
    pub fn new() -> Self {
        Self { width: 40 }
    }

    fn render(&self, lines: &[String]) -> String {
        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.width);

        let mut out = String::new();
        out.push_str(&format!("┌{}┐\n", "─".repeat(width)));
        for line in lines {
            let padding = width - line.chars().count();
            out.push_str(&format!("│{}{}│\n", line, " ".repeat(padding)));
        }
        out.push_str(&format!("└{}┘", "─".repeat(width)));
        out
    }
}

impl Default for DisplayConsole {
    fn default() -> Self {
        Self::new()
    }
}

fn prediction_lines(result: &PredictionResult, ranked: &[Classification]) -> Vec<String> {
    let mut lines = vec![format!("Prediction: {}", result)];
    if let PredictionResult::Known(classification) = result {
        lines.push(format!("Confidence: {:.4}", classification.confidence));
    }
    if !ranked.is_empty() {
        lines.push(String::new());
        for (rank, classification) in ranked.iter().enumerate() {
            lines.push(format!(
                "{:>2}. {} ({:.4})",
                rank + 1,
                classification.label,
                classification.confidence
            ));
        }
    }
    lines
}

impl Display for DisplayConsole {
    fn show_prediction(
        &mut self,
        result: &PredictionResult,
        ranked: &[Classification],
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("{}", self.render(&prediction_lines(result, ranked)));
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("{}", self.render(&[message.to_string()]));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pads_to_width() {
        let display = DisplayConsole { width: 5 };

        let rendered = display.render(&["ab".to_string()]);

        assert_eq!(rendered, "┌─────┐\n│ab   │\n└─────┘");
    }

    #[test]
    fn test_render_grows_for_long_lines() {
        let display = DisplayConsole { width: 2 };

        let rendered = display.render(&["abcd".to_string()]);

        assert_eq!(rendered, "┌────┐\n│abcd│\n└────┘");
    }

    #[test]
    fn test_prediction_lines_with_ranking() {
        let best = Classification {
            index: 1,
            label: "daisy".to_string(),
            confidence: 0.75,
        };
        let runner_up = Classification {
            index: 3,
            label: "tulip".to_string(),
            confidence: 0.125,
        };

        let lines = prediction_lines(
            &PredictionResult::Known(best.clone()),
            &[best, runner_up],
        );

        assert_eq!(
            lines,
            vec![
                "Prediction: daisy".to_string(),
                "Confidence: 0.7500".to_string(),
                String::new(),
                " 1. daisy (0.7500)".to_string(),
                " 2. tulip (0.1250)".to_string(),
            ]
        );
    }

    #[test]
    fn test_prediction_lines_unknown() {
        let lines = prediction_lines(&PredictionResult::Unknown, &[]);

        assert_eq!(lines, vec!["Prediction: Unknown".to_string()]);
    }
}
