//! Static French/English text.
//!
//! Nothing here holds a "current" language: every lookup takes the
//! [`Language`] it should render in.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    domain::{EventCategory, EventStatus, ParticipantStatus},
    error::ParseError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            _ => Err(ParseError::new("Language", raw)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized {
    pub fr: &'static str,
    pub en: &'static str,
}

impl Localized {
    pub const fn new(fr: &'static str, en: &'static str) -> Self {
        Self { fr, en }
    }

    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::Fr => self.fr,
            Language::En => self.en,
        }
    }
}

pub fn category_label(category: EventCategory) -> Localized {
    match category {
        EventCategory::Music => Localized::new("Musique", "Music"),
        EventCategory::Dance => Localized::new("Danse", "Dance"),
        EventCategory::Theater => Localized::new("Théâtre", "Theater"),
        EventCategory::Art => Localized::new("Art", "Art"),
        EventCategory::Festival => Localized::new("Festival", "Festival"),
        EventCategory::Workshop => Localized::new("Atelier", "Workshop"),
        EventCategory::Conference => Localized::new("Conférence", "Conference"),
        EventCategory::Other => Localized::new("Autre", "Other"),
    }
}

pub fn category_icon(category: EventCategory) -> &'static str {
    match category {
        EventCategory::Music => "🎵",
        EventCategory::Dance => "💃",
        EventCategory::Theater => "🎭",
        EventCategory::Art => "🎨",
        EventCategory::Festival => "🎪",
        EventCategory::Workshop => "🛠️",
        EventCategory::Conference => "🎤",
        EventCategory::Other => "📅",
    }
}

/// Header content of a category landing page.
#[derive(Debug, Clone, Copy)]
pub struct CategoryInfo {
    pub title: Localized,
    pub description: Localized,
    pub icon: &'static str,
    pub background_image: &'static str,
}

pub fn category_info(category: EventCategory) -> CategoryInfo {
    let (title, description, background_image) = match category {
        EventCategory::Music => (
            Localized::new("Événements Musicaux", "Music Events"),
            Localized::new(
                "Découvrez la richesse de la musique congolaise à travers concerts, festivals et performances live",
                "Discover the richness of Congolese music through concerts, festivals and live performances",
            ),
            "https://images.pexels.com/photos/3593865/pexels-photo-3593865.jpeg",
        ),
        EventCategory::Dance => (
            Localized::new("Événements de Danse", "Dance Events"),
            Localized::new(
                "Explorez les traditions de danse congolaise et les créations contemporaines",
                "Explore Congolese dance traditions and contemporary creations",
            ),
            "https://images.pexels.com/photos/1405816/pexels-photo-1405816.jpeg",
        ),
        EventCategory::Theater => (
            Localized::new("Théâtre et Arts de la Scène", "Theater and Performing Arts"),
            Localized::new(
                "Plongez dans l'univers du théâtre congolais et des arts de la scène",
                "Dive into the world of Congolese theater and performing arts",
            ),
            "https://images.pexels.com/photos/713149/pexels-photo-713149.jpeg",
        ),
        EventCategory::Art => (
            Localized::new("Arts Visuels", "Visual Arts"),
            Localized::new(
                "Admirez les œuvres d'artistes congolais dans nos expositions et galeries",
                "Admire the works of Congolese artists in our exhibitions and galleries",
            ),
            "https://images.pexels.com/photos/1509534/pexels-photo-1509534.jpeg",
        ),
        EventCategory::Festival => (
            Localized::new("Festivals Culturels", "Cultural Festivals"),
            Localized::new(
                "Participez aux grands festivals qui célèbrent la culture congolaise",
                "Participate in major festivals celebrating Congolese culture",
            ),
            "https://images.pexels.com/photos/3760529/pexels-photo-3760529.jpeg",
        ),
        EventCategory::Workshop => (
            Localized::new("Ateliers et Formations", "Workshops and Training"),
            Localized::new(
                "Développez vos compétences artistiques avec nos ateliers spécialisés",
                "Develop your artistic skills with our specialized workshops",
            ),
            "https://images.pexels.com/photos/3184338/pexels-photo-3184338.jpeg",
        ),
        EventCategory::Conference => (
            Localized::new("Conférences Culturelles", "Cultural Conferences"),
            Localized::new(
                "Participez aux débats sur l'avenir de la culture congolaise",
                "Participate in debates about the future of Congolese culture",
            ),
            "https://images.pexels.com/photos/2774556/pexels-photo-2774556.jpeg",
        ),
        EventCategory::Other => (
            Localized::new("Autres Événements", "Other Events"),
            Localized::new(
                "Découvrez d'autres événements culturels uniques et innovants",
                "Discover other unique and innovative cultural events",
            ),
            "https://images.pexels.com/photos/3184338/pexels-photo-3184338.jpeg",
        ),
    };

    CategoryInfo {
        title,
        description,
        icon: category_icon(category),
        background_image,
    }
}

pub fn status_label(status: EventStatus) -> Localized {
    match status {
        EventStatus::Upcoming => Localized::new("À venir", "Upcoming"),
        EventStatus::Ongoing => Localized::new("En cours", "Ongoing"),
        EventStatus::Completed => Localized::new("Terminé", "Completed"),
        EventStatus::Cancelled => Localized::new("Annulé", "Cancelled"),
    }
}

pub fn participant_status_label(status: ParticipantStatus) -> Localized {
    match status {
        ParticipantStatus::Confirmed => Localized::new("Confirmé", "Confirmed"),
        ParticipantStatus::Pending => Localized::new("En attente", "Pending"),
        ParticipantStatus::Cancelled => Localized::new("Annulé", "Cancelled"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    EventsTitle,
    EventsSubtitle,
    NoEventsFound,
    Free,
    RegistrationSuccessTitle,
    RegistrationSuccessBody,
    LoginSuccess,
    ContactSuccessTitle,
    ContactSuccessBody,
    ApplicationSuccessTitle,
    ApplicationSuccessBody,
    EventCreatedTitle,
    DraftSaved,
    TitleRequired,
    ShortDescriptionRequired,
    DescriptionRequired,
    StartDateRequired,
    EndDateRequired,
    LocationRequired,
    EndBeforeStart,
    CapacityPositive,
    InvalidImageUrl,
    FieldRequired,
}

pub fn text(key: TextKey) -> Localized {
    match key {
        TextKey::EventsTitle => Localized::new("Événements Culturels", "Cultural Events"),
        TextKey::EventsSubtitle => Localized::new(
            "Découvrez la richesse culturelle du Congo à travers nos événements exceptionnels",
            "Discover the cultural richness of Congo through our exceptional events",
        ),
        TextKey::NoEventsFound => Localized::new("Aucun événement trouvé", "No events found"),
        TextKey::Free => Localized::new("Gratuit", "Free"),
        TextKey::RegistrationSuccessTitle => {
            Localized::new("Inscription réussie !", "Registration Successful!")
        }
        TextKey::RegistrationSuccessBody => Localized::new(
            "Votre inscription a été confirmée. Vous recevrez un email avec les détails de votre inscription.",
            "Your registration has been confirmed. You will receive an email with the details of your registration.",
        ),
        TextKey::LoginSuccess => Localized::new("Connexion réussie", "Signed in successfully"),
        TextKey::ContactSuccessTitle => {
            Localized::new("Message envoyé avec succès !", "Message sent successfully!")
        }
        TextKey::ContactSuccessBody => Localized::new(
            "Nous vous répondrons dans les plus brefs délais.",
            "We will get back to you as soon as possible.",
        ),
        TextKey::ApplicationSuccessTitle => {
            Localized::new("Candidature envoyée !", "Application sent!")
        }
        TextKey::ApplicationSuccessBody => Localized::new(
            "Nous examinerons votre candidature et vous contacterons sous 48h.",
            "We will review your application and contact you within 48h.",
        ),
        TextKey::EventCreatedTitle => Localized::new("Événement créé", "Event created"),
        TextKey::DraftSaved => Localized::new("Brouillon sauvegardé", "Draft saved"),
        TextKey::TitleRequired => Localized::new("Le titre est requis", "Title is required"),
        TextKey::ShortDescriptionRequired => Localized::new(
            "La description courte est requise",
            "Short description is required",
        ),
        TextKey::DescriptionRequired => {
            Localized::new("La description est requise", "Description is required")
        }
        TextKey::StartDateRequired => {
            Localized::new("La date de début est requise", "Start date is required")
        }
        TextKey::EndDateRequired => {
            Localized::new("La date de fin est requise", "End date is required")
        }
        TextKey::LocationRequired => Localized::new("Le lieu est requis", "Location is required"),
        TextKey::EndBeforeStart => Localized::new(
            "La date de fin doit être après la date de début",
            "End date must be after start date",
        ),
        TextKey::CapacityPositive => Localized::new(
            "La capacité doit être supérieure à 0",
            "Capacity must be greater than 0",
        ),
        TextKey::InvalidImageUrl => {
            Localized::new("L'URL de l'image est invalide", "Image URL is invalid")
        }
        TextKey::FieldRequired => Localized::new("Ce champ est requis", "This field is required"),
    }
}

/// Shorthand for `text(key).get(language)`.
pub fn t(key: TextKey, language: Language) -> &'static str {
    text(key).get(language)
}

#[cfg(test)]
#[path = "tests/i18n_tests.rs"]
mod tests;
