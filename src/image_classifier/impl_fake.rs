use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::{ClassificationModel, InputTensor, OutputVector};
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

enum Scores {
    #[cfg(test)]
    Fixed(Vec<f32>),
    Random { class_count: usize, seed: u64 },
}

/// Stand-in for a real model. Random scores are seeded from the input, so the
/// same tensor always yields the same output.
pub struct ModelFake {
    scores: Scores,
}

impl ModelFake {
    pub fn new(class_count: usize, seed: u64) -> Self {
        Self {
            scores: Scores::Random { class_count, seed },
        }
    }

    #[cfg(test)]
    pub fn with_scores(scores: Vec<f32>) -> Self {
        Self {
            scores: Scores::Fixed(scores),
        }
    }
}

fn input_seed(seed: u64, input: &InputTensor) -> u64 {
    input.values.iter().fold(seed, |acc, value| {
        acc.rotate_left(5) ^ u64::from(value.to_bits())
    })
}

impl ClassificationModel for ModelFake {
    fn run(&self, input: &InputTensor) -> Result<OutputVector, ClassifierError> {
        match &self.scores {
            #[cfg(test)]
            Scores::Fixed(scores) => Ok(OutputVector {
                scores: scores.clone(),
            }),
            Scores::Random { class_count, seed } => {
                let mut rng = StdRng::seed_from_u64(input_seed(*seed, input));
                let distribution = Uniform::new(0.0f32, 1.0)
                    .map_err(|e| ClassifierError::Inference(e.to_string()))?;

                let raw: Vec<f32> = (0..*class_count)
                    .map(|_| distribution.sample(&mut rng))
                    .collect();
                let total: f32 = raw.iter().sum();
                let scores = if total > 0.0 {
                    raw.iter().map(|score| score / total).collect()
                } else {
                    raw
                };

                Ok(OutputVector { scores })
            }
        }
    }
}
