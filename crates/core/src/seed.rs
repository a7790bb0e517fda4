//! Default subject catalogue used on first launch and whenever persisted
//! progress cannot be read.

use crate::model::{Subject, SubjectId};

const CONSTITUTIONAL: &str = "Direito Constitucional";
const ADMINISTRATIVE: &str = "Direito Administrativo";
const PORTUGUESE: &str = "Português";
const MATHEMATICS: &str = "Matemática";

const SEED: [(&str, &str, &str); 20] = [
    ("const-1", "Princípios Fundamentais", CONSTITUTIONAL),
    ("const-2", "Direitos e Garantias Fundamentais", CONSTITUTIONAL),
    ("const-3", "Organização do Estado", CONSTITUTIONAL),
    ("const-4", "Poder Legislativo", CONSTITUTIONAL),
    ("const-5", "Poder Executivo", CONSTITUTIONAL),
    ("admin-1", "Princípios da Administração", ADMINISTRATIVE),
    ("admin-2", "Atos Administrativos", ADMINISTRATIVE),
    ("admin-3", "Licitações e Contratos", ADMINISTRATIVE),
    ("admin-4", "Serviços Públicos", ADMINISTRATIVE),
    ("admin-5", "Responsabilidade Civil do Estado", ADMINISTRATIVE),
    ("port-1", "Ortografia e Acentuação", PORTUGUESE),
    ("port-2", "Morfologia", PORTUGUESE),
    ("port-3", "Sintaxe", PORTUGUESE),
    ("port-4", "Interpretação de Texto", PORTUGUESE),
    ("port-5", "Redação Oficial", PORTUGUESE),
    ("mat-1", "Aritmética", MATHEMATICS),
    ("mat-2", "Álgebra", MATHEMATICS),
    ("mat-3", "Geometria", MATHEMATICS),
    ("mat-4", "Estatística", MATHEMATICS),
    ("mat-5", "Matemática Financeira", MATHEMATICS),
];

/// Returns the default subjects, in display order, with every flag cleared.
#[must_use]
pub fn default_subjects() -> Vec<Subject> {
    SEED.iter()
        .filter_map(|(id, name, category)| Subject::new(SubjectId::new(*id), *name, *category).ok())
        .collect()
}
