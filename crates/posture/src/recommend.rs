use {crate::*, serde::Serialize};

/// Area name of the success entry
pub const GENERAL_AREA: &str = "General";

pub const SUCCESS_MESSAGE: &str =
    "Tu postura ergonómica es excelente. Todos los ángulos están dentro del rango óptimo.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Warning,
    Success,
}

/// One finding of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub area: String,
    pub message: String,
    /// Rounded angle that triggered a warning; `null` for the success entry
    pub angle: Option<f64>,
}

/// Measured angle of one area next to its optimal range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AngleDetail {
    pub segment: String,
    pub current_angle: f64,
    pub optimal_range: String,
    pub reference: String,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PostureReport {
    pub recommendations: Vec<Recommendation>,
    pub angle_details: Vec<AngleDetail>,
}

impl PostureReport {
    pub fn warnings(&self) -> impl Iterator<Item = &Recommendation> + '_ {
        self.recommendations
            .iter()
            .filter(|recommendation| recommendation.kind == RecommendationKind::Warning)
    }
}

/// Human-readable texts of an area
struct AreaText {
    segment: &'static str,
    optimal_range: &'static str,
    reference: &'static str,
    warning_area: &'static str,
    message: &'static str,
}

// indexed by `Area`
const AREA_TEXTS: [AreaText; AREA_COUNT] = [
    AreaText {
        segment: "Cadera (tronco-muslo)",
        optimal_range: "90-110°",
        reference: "Vertical vs horizontal",
        warning_area: "Cadera",
        message: "Ángulo de cadera fuera del rango óptimo (90-110°). Ajusta la posición del tronco.",
    },
    AreaText {
        segment: "Rodilla (muslo-pierna)",
        optimal_range: "90-100°",
        reference: "Horizontal vs vertical",
        warning_area: "Rodillas",
        message: "Ángulo de rodillas fuera del rango óptimo (90-100°). Ajusta la altura del asiento.",
    },
    AreaText {
        segment: "Tobillo (pierna-pie)",
        optimal_range: "90-100°",
        reference: "Pierna vs pie",
        warning_area: "Tobillos",
        message: "Ángulo de tobillos fuera del rango óptimo (90-100°). Asegúrate de tener los pies planos en el suelo.",
    },
    AreaText {
        segment: "Codo (brazo-antebrazo)",
        optimal_range: "90-100°",
        reference: "Brazo vs antebrazo",
        warning_area: "Codos",
        message: "Ángulo de codos fuera del rango óptimo (90-100°). Antebrazo debe estar paralelo al escritorio.",
    },
    AreaText {
        segment: "Cuello (alineación cabeza-tronco)",
        optimal_range: "160-180°",
        reference: "Columna vertebral recta",
        warning_area: "Cuello",
        message: "Cabeza no está alineada correctamente con el tronco (160-180°). Mantén el cuello recto.",
    },
    AreaText {
        segment: "Hombro (brazo-tronco)",
        optimal_range: "0-20°",
        reference: "Brazo respecto al eje del tronco",
        warning_area: "Hombros",
        message: "Ángulo de hombros fuera del rango óptimo (0-20°). Mantén los hombros relajados, sin elevación o tensión.",
    },
    AreaText {
        segment: "Muñeca (antebrazo-mano)",
        optimal_range: "0-15°",
        reference: "Eje del antebrazo respecto al dorso de la mano",
        warning_area: "Muñecas",
        message: "Ángulo de muñecas fuera del rango óptimo (0-15°). Evita presión en el túnel carpiano manteniendo las muñecas rectas.",
    },
    AreaText {
        segment: "Ángulo visual (cabeza-tronco)",
        optimal_range: "10-20°",
        reference: "Línea del cuello respecto al eje del tronco",
        warning_area: "Ángulo visual",
        message: "Ángulo visual fuera del rango óptimo (10-20°). Ajusta la inclinación de la cabeza para mirar la pantalla sin excesiva flexión del cuello.",
    },
];

impl Area {
    /// Label of the area in angle details
    pub fn detail_label(self) -> &'static str {
        AREA_TEXTS[self as usize].segment
    }

    /// Label of the area in warnings
    pub fn warning_label(self) -> &'static str {
        AREA_TEXTS[self as usize].warning_area
    }

    pub fn warning_message(self) -> &'static str {
        AREA_TEXTS[self as usize].message
    }
}

/// Round to two decimals, exact halves to even: `round2(0.125) == 0.12`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Build the report for a classification.
///
/// Areas are visited in [`Area::ALL`] order. Every present area yields one
/// detail; bad areas also yield a warning. A report without warnings gets a
/// single success entry.
pub fn generate_recommendations(status: &SegmentStatus) -> PostureReport {
    let mut report = PostureReport::default();
    for (area, verdict) in status.areas() {
        let text = &AREA_TEXTS[area as usize];
        let angle = round2(verdict.angle);
        report.angle_details.push(AngleDetail {
            segment: text.segment.to_string(),
            current_angle: angle,
            optimal_range: text.optimal_range.to_string(),
            reference: text.reference.to_string(),
            status: verdict.status,
        });
        if verdict.status == Status::Bad {
            report.recommendations.push(Recommendation {
                kind: RecommendationKind::Warning,
                area: text.warning_area.to_string(),
                message: text.message.to_string(),
                angle: Some(angle),
            });
        }
    }
    if report.recommendations.is_empty() {
        report.recommendations.push(Recommendation {
            kind: RecommendationKind::Success,
            area: GENERAL_AREA.to_string(),
            message: SUCCESS_MESSAGE.to_string(),
            angle: None,
        });
    }
    report
}
