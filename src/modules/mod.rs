pub mod quality_gate;
pub mod zone_segmentation;
pub mod pixel_statistics;
pub mod clinical_scorer;
pub mod skin_age;
pub mod future_prediction;
