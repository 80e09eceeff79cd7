//! Text features and classifiers.
//!
//! Classifiers are black boxes behind [`classifier::Classifier`]; the
//! pipeline in [`model`] picks the best candidate by held-out accuracy.

pub mod classifier;
pub mod metrics;
pub mod model;
pub mod role;
pub mod split;
pub mod text;
pub mod vectorizer;

pub use classifier::{Classifier, LogisticRegression, NaiveBayes, NearestCentroid};
pub use metrics::{ClassMetrics, ClassificationReport};
pub use model::{TextModel, TrainingReport};
pub use role::{RoleClassifier, RoleTrainingReport};
pub use vectorizer::{TextVectorizer, Weighting};
