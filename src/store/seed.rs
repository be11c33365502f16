use serde_json::json;
use time::OffsetDateTime;

use crate::domain::models::{
    Course, Exercise, Module, Pdf, PortalSettings, Question, QuestionOption, Video,
};
use crate::domain::types::QuestionKind;

// Fixed ids keep the seed idempotent: re-applying it overwrites the same
// documents instead of duplicating them.
pub(crate) const SEED_COURSE_ID: &str = "course-manguezal";

pub(crate) struct SeedData {
    pub(crate) courses: Vec<Course>,
    pub(crate) modules: Vec<Module>,
    pub(crate) videos: Vec<Video>,
    pub(crate) pdfs: Vec<Pdf>,
    pub(crate) exercises: Vec<Exercise>,
    pub(crate) settings: PortalSettings,
}

/// Demonstration dataset: one course, three modules, sample videos and pdfs,
/// one 30-point exercise and default certificate settings.
pub(crate) fn demo_data(owner_id: &str) -> SeedData {
    let now = OffsetDateTime::now_utc();

    let courses = vec![Course {
        id: SEED_COURSE_ID.to_string(),
        title: "Ecossistema Manguezal".to_string(),
        description: Some(
            "Aprenda sobre a rica biodiversidade e importância ecológica dos manguezais \
             brasileiros."
                .to_string(),
        ),
        thumbnail: None,
        duration_hours: 40,
        min_grade: 70,
        owner_id: owner_id.to_string(),
        professor_name: Some("Professor Administrador".to_string()),
        is_active: true,
        created_at: now,
        updated_at: None,
    }];

    let modules = vec![
        seed_module("module-introducao", "Introdução ao Manguezal", 1, now),
        seed_module("module-biodiversidade", "Biodiversidade", 2, now),
        seed_module("module-conservacao", "Conservação e Preservação", 3, now),
    ];

    let videos = vec![
        Video {
            id: "video-o-que-sao".to_string(),
            module_id: "module-introducao".to_string(),
            course_id: SEED_COURSE_ID.to_string(),
            title: "O que são Manguezais?".to_string(),
            description: Some(
                "Uma introdução ao ecossistema manguezal e sua importância global.".to_string(),
            ),
            url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
            duration_minutes: 15,
            order: 1,
            created_at: now,
            updated_at: None,
        },
        Video {
            id: "video-distribuicao".to_string(),
            module_id: "module-introducao".to_string(),
            course_id: SEED_COURSE_ID.to_string(),
            title: "Distribuição Geográfica".to_string(),
            description: Some("Onde encontramos manguezais no Brasil e no mundo.".to_string()),
            url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
            duration_minutes: 12,
            order: 2,
            created_at: now,
            updated_at: None,
        },
        Video {
            id: "video-flora".to_string(),
            module_id: "module-biodiversidade".to_string(),
            course_id: SEED_COURSE_ID.to_string(),
            title: "Flora do Manguezal".to_string(),
            description: Some(
                "Conheça as principais espécies de plantas do manguezal.".to_string(),
            ),
            url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
            duration_minutes: 18,
            order: 1,
            created_at: now,
            updated_at: None,
        },
    ];

    let pdfs = vec![
        Pdf {
            id: "pdf-apostila-introducao".to_string(),
            module_id: "module-introducao".to_string(),
            course_id: SEED_COURSE_ID.to_string(),
            title: "Apostila - Introdução ao Manguezal".to_string(),
            description: Some("Material didático completo sobre os conceitos básicos.".to_string()),
            file_name: "introducao-manguezal.pdf".to_string(),
            file_size: 2_500_000,
            order: 1,
            created_at: now,
            updated_at: None,
        },
        Pdf {
            id: "pdf-guia-especies".to_string(),
            module_id: "module-biodiversidade".to_string(),
            course_id: SEED_COURSE_ID.to_string(),
            title: "Guia de Identificação de Espécies".to_string(),
            description: Some("Guia ilustrado para identificar fauna e flora.".to_string()),
            file_name: "guia-especies.pdf".to_string(),
            file_size: 5_000_000,
            order: 1,
            created_at: now,
            updated_at: None,
        },
    ];

    let exercises = vec![Exercise {
        id: "exercise-avaliacao-introducao".to_string(),
        module_id: "module-introducao".to_string(),
        course_id: SEED_COURSE_ID.to_string(),
        title: "Avaliação - Introdução ao Manguezal".to_string(),
        description: Some("Teste seus conhecimentos sobre os conceitos básicos.".to_string()),
        questions: vec![
            Question {
                id: "question-caracteristica".to_string(),
                kind: QuestionKind::Multiple,
                text: "Qual é a principal característica que define um manguezal?".to_string(),
                options: vec![
                    option("a", "Presença de água salgada ou salobra"),
                    option("b", "Solo arenoso e seco"),
                    option("c", "Altitude elevada"),
                    option("d", "Clima frio"),
                ],
                correct_answer: json!("a"),
                points: 10,
            },
            Question {
                id: "question-apenas-brasil".to_string(),
                kind: QuestionKind::Truefalse,
                text: "Os manguezais são encontrados apenas no Brasil.".to_string(),
                options: Vec::new(),
                correct_answer: json!(false),
                points: 10,
            },
            Question {
                id: "question-importancia".to_string(),
                kind: QuestionKind::Multiple,
                text: "Qual a importância ecológica dos manguezais?".to_string(),
                options: vec![
                    option("a", "Apenas paisagística"),
                    option("b", "Berçário de espécies marinhas e proteção costeira"),
                    option("c", "Produção de madeira"),
                    option("d", "Nenhuma importância significativa"),
                ],
                correct_answer: json!("b"),
                points: 10,
            },
        ],
        total_points: 30,
        order: 1,
        created_at: now,
        updated_at: None,
    }];

    let settings = PortalSettings {
        professor_name: "Professor Responsável".to_string(),
        professor_title: "Doutor em Ciências Ambientais".to_string(),
        institution_name: "PROPEC/IFRJ".to_string(),
        course_name: "Curso Manguezal".to_string(),
        certificate_header: "CERTIFICADO DE CONCLUSÃO".to_string(),
        certificate_body: "Certificamos que {nome} concluiu com aproveitamento o curso {curso}, \
                           com carga horária de {carga_horaria} horas."
            .to_string(),
        ..PortalSettings::default()
    };

    SeedData { courses, modules, videos, pdfs, exercises, settings }
}

fn seed_module(id: &str, title: &str, order: u32, now: OffsetDateTime) -> Module {
    Module {
        id: id.to_string(),
        course_id: SEED_COURSE_ID.to_string(),
        title: title.to_string(),
        description: None,
        order,
        created_at: now,
        updated_at: None,
    }
}

fn option(id: &str, text: &str) -> QuestionOption {
    QuestionOption { id: id.to_string(), text: text.to_string() }
}
