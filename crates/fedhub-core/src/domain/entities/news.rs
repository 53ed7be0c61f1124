use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::domain::common::Fields;
use crate::domain::value_objects::{Collection, EntityId, NewsStatus};

/// A news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: EntityId,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub category: String,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub status: NewsStatus,
    pub updated_at: DateTime<Utc>,
}

impl NewsItem {
    pub fn is_published(&self) -> bool {
        self.status == NewsStatus::Published
    }
}

impl Entity for NewsItem {
    const COLLECTION: Collection = Collection::News;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn summary(&self) -> String {
        format!("{} [{}]", self.title, self.status)
    }

    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self {
        Self {
            id,
            title: fields.text_or_default(&["title", "titulo"]),
            summary: fields.text_or_default(&["summary", "excerpt", "resumo"]),
            body: fields.text_or_default(&["body", "content", "conteudo"]),
            category: fields.text_or_default(&["category", "categoria"]),
            author: fields.text_or_default(&["author", "author_name", "autor"]),
            published_at: fields.timestamp(&["published_at", "publish_date", "created_at"]),
            tags: fields.tags(&["tags", "etiquetas"]),
            image_url: fields.text(&["image_url", "featured_image", "imagem"]),
            featured: fields.flag(&["featured", "is_featured", "destaque"]),
            status: fields.vocabulary(&["status", "estado"]),
            updated_at: fields.updated_at(),
        }
    }
}
