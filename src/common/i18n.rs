// src/common/i18n.rs

use std::collections::HashMap;

const DEFAULT_LANG: &str = "en";

const EN: &[(&str, &str)] = &[
    ("validation_error", "One or more fields are invalid."),
    ("invalid_document", "Invalid CPF."),
    ("invalid_brand", "Invalid watch brand."),
    ("invalid_repair_types", "Invalid repair types."),
    ("duplicate_document_number", "A customer with this CPF already exists."),
    ("duplicate_reference_number", "Reference number already in use."),
    ("duplicate_brand_name", "Watch brand already exists."),
    ("not_found", "Resource not found."),
    ("invalid_status", "Invalid status."),
    ("malformed_identifier", "Invalid ID format."),
    ("reference_space_exhausted", "No reference numbers available, try again later."),
    ("internal_error", "An unexpected error occurred."),
];

const PT: &[(&str, &str)] = &[
    ("validation_error", "Um ou mais campos são inválidos."),
    ("invalid_document", "CPF inválido."),
    ("invalid_brand", "Marca de relógio inválida."),
    ("invalid_repair_types", "Tipos de reparo inválidos."),
    ("duplicate_document_number", "Já existe um cliente com este CPF."),
    ("duplicate_reference_number", "Número de referência já utilizado."),
    ("duplicate_brand_name", "Esta marca de relógio já existe."),
    ("not_found", "Recurso não encontrado."),
    ("invalid_status", "Status inválido."),
    ("malformed_identifier", "Formato de ID inválido."),
    ("reference_space_exhausted", "Sem números de referência disponíveis, tente mais tarde."),
    ("internal_error", "Ocorreu um erro inesperado."),
];

/// Catálogo de mensagens de erro por idioma.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        messages.insert("en", EN.iter().copied().collect());
        messages.insert("pt", PT.iter().copied().collect());
        Self { messages }
    }

    /// Busca a mensagem no idioma pedido, cai para inglês e, por último, devolve o próprio código.
    pub fn translate(&self, lang: &str, code: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|catalog| catalog.get(code))
            .or_else(|| {
                self.messages
                    .get(DEFAULT_LANG)
                    .and_then(|catalog| catalog.get(code))
            })
            .map(|m| m.to_string())
            .unwrap_or_else(|| code.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
