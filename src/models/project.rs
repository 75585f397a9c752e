use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Project {
    #[serde(rename = "id_proyecto")]
    pub id: i32,
    #[serde(rename = "nombre_proyecto")]
    pub name: String,
    #[serde(rename = "id_obra")]
    pub work_id: i32,
    #[serde(rename = "fecha_inicio_proyecto")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fecha_fin_proyecto")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "estado_proyecto")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectInput {
    #[serde(rename = "id_obra")]
    pub work_id: i32,
    #[serde(rename = "nombre_proyecto")]
    pub name: String,
    #[serde(rename = "fecha_inicio_proyecto")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fecha_fin_proyecto")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "estado_proyecto")]
    pub status: Option<String>,
}

impl Resource for Project {
    const PATH: &'static str = "/proyectos";
    type Input = ProjectInput;
}
