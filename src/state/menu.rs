//! Menu catalog
//!
//! The selectable intake options, their mapping to notice types and the
//! texts the bot answers with. Loaded once with the settings and never
//! mutated afterwards.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::NoticeType;
use crate::utils::errors::{IntakeBotError, Result};
use crate::utils::helpers::normalize_choice;

/// WhatsApp allows at most three reply buttons per interactive message
pub const MAX_BUTTONS: usize = 3;

/// WhatsApp limit for a reply button title
pub const MAX_BUTTON_TITLE_CHARS: usize = 20;

/// A reply button offered in the intake menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButton {
    pub id: String,
    pub title: String,
}

impl MenuButton {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
        }
    }
}

/// Plain-text replies of the intake flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub ask_absence_days: String,
    pub ask_certificate_detail: String,
    pub absence_recorded: String,
    pub certificate_recorded: String,
    pub restart: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            ask_absence_days: "¿Cuántos días de inasistencia querés registrar?".to_string(),
            ask_certificate_detail: "Podés escribir un breve detalle del certificado o adjuntar una imagen (por ahora solo manejamos texto).".to_string(),
            absence_recorded: "✅ Inasistencia registrada. ¡Que te mejores!".to_string(),
            certificate_recorded: "✅ Certificado registrado. ¡Gracias por avisar!".to_string(),
            restart: "Por favor, escribí tu DNI para comenzar.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuCatalog {
    /// Body of the interactive menu message
    pub body_text: String,
    pub buttons: Vec<MenuButton>,
    /// Button reply id -> intake type
    pub id_to_type: HashMap<String, NoticeType>,
    /// Normalized free-text answer -> intake type
    pub text_to_type: HashMap<String, NoticeType>,
    pub prompts: Prompts,
}

impl Default for MenuCatalog {
    fn default() -> Self {
        let id_to_type = HashMap::from([
            ("op_inasistencia".to_string(), NoticeType::Absence),
            ("op_certificado".to_string(), NoticeType::Certificate),
        ]);

        let text_to_type = HashMap::from([
            ("1".to_string(), NoticeType::Absence),
            ("inasistencia".to_string(), NoticeType::Absence),
            ("notificar inasistencia".to_string(), NoticeType::Absence),
            ("avisar inasistencia".to_string(), NoticeType::Absence),
            ("2".to_string(), NoticeType::Certificate),
            ("certificado".to_string(), NoticeType::Certificate),
            ("subir certificado".to_string(), NoticeType::Certificate),
        ]);

        Self {
            body_text: "¿Querés notificar una inasistencia o subir un certificado?".to_string(),
            buttons: vec![
                MenuButton::new("op_inasistencia", "Avisar inasistencia"),
                MenuButton::new("op_certificado", "Subir certificado"),
            ],
            id_to_type,
            text_to_type,
            prompts: Prompts::default(),
        }
    }
}

impl MenuCatalog {
    /// Resolve the intake type a user picked.
    ///
    /// A known button id wins over the text. Text must match a catalog key
    /// exactly once trimmed and lower-cased.
    pub fn resolve(&self, selected_option_id: Option<&str>, text: &str) -> Option<NoticeType> {
        if let Some(notice_type) = selected_option_id.and_then(|id| self.id_to_type.get(id)) {
            return Some(*notice_type);
        }

        self.text_to_type.get(&normalize_choice(text)).copied()
    }

    /// Check the catalog can be rendered by WhatsApp and is internally consistent
    pub fn validate(&self) -> Result<()> {
        if self.body_text.trim().is_empty() {
            return Err(IntakeBotError::Config("Menu body text is required".to_string()));
        }

        if self.buttons.is_empty() || self.buttons.len() > MAX_BUTTONS {
            return Err(IntakeBotError::Config(format!(
                "Menu must have between 1 and {} buttons, got {}",
                MAX_BUTTONS,
                self.buttons.len()
            )));
        }

        let mut ids = HashSet::new();
        for button in &self.buttons {
            if button.id.is_empty() || button.title.trim().is_empty() {
                return Err(IntakeBotError::Config("Menu buttons need an id and a title".to_string()));
            }
            if button.title.chars().count() > MAX_BUTTON_TITLE_CHARS {
                return Err(IntakeBotError::Config(format!(
                    "Menu button title '{}' exceeds {} characters",
                    button.title, MAX_BUTTON_TITLE_CHARS
                )));
            }
            if !ids.insert(button.id.as_str()) {
                return Err(IntakeBotError::Config(format!("Duplicate menu button id: {}", button.id)));
            }
        }

        if let Some(unknown) = self.id_to_type.keys().find(|id| !ids.contains(id.as_str())) {
            return Err(IntakeBotError::Config(format!(
                "Menu option '{}' does not match any button",
                unknown
            )));
        }

        if let Some(key) = self.text_to_type.keys().find(|key| normalize_choice(key) != **key) {
            return Err(IntakeBotError::Config(format!(
                "Menu text key '{}' must be trimmed and lower-case",
                key
            )));
        }

        Ok(())
    }
}
