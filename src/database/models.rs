use chrono::NaiveDateTime;

use crate::domain::{Modality, Surface, Tier};

#[derive(Debug, Clone)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub region_code: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub tier: Tier,
    pub year: i32,
    pub surface: Surface,
    pub modality: Modality,
    pub completed: bool,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Region {
    pub code: String,
    pub name: String,
    pub config: crate::ranking::RegionConfig,
}
