//! Tabular export: two flat sheets and two mean pivots, written as CSV.

use crate::application::models::summary::{AccountRecord, Metric};
use crate::error::AppError;
use crate::utils::engagement::round2;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ACCOUNTS_FILE: &str = "datos_cuentas.csv";
pub const POSTS_FILE: &str = "datos_posts.csv";
pub const ACCOUNT_PIVOT_FILE: &str = "analisis_cuentas.csv";
pub const POST_PIVOT_FILE: &str = "analisis_posts.csv";

/// One account per row. Unavailable numbers are written as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountRow {
    #[serde(rename = "Nombre de usuario")]
    pub username: String,
    #[serde(rename = "ID de usuario")]
    pub user_id: String,
    #[serde(rename = "Nombre completo")]
    pub full_name: String,
    #[serde(rename = "Biografía")]
    pub biography: String,
    #[serde(rename = "País")]
    pub country: String,
    #[serde(rename = "URL Perfil")]
    pub profile_url: String,
    #[serde(rename = "Categoría")]
    pub category: String,
    #[serde(rename = "cantidad seguidores")]
    pub followers: u64,
    #[serde(rename = "cantidad seguidos")]
    pub following: u64,
    #[serde(rename = "cantidad de publicaciones")]
    pub posts: u64,
    #[serde(rename = "Está verificado")]
    pub is_verified: String,
    #[serde(rename = "¿Es una cuenta profesional?")]
    pub is_business_account: String,
    #[serde(rename = "Tiene Historias Destacadas")]
    pub has_highlights: String,
    #[serde(rename = "URL Externa (Bio)")]
    pub external_url: String,
    #[serde(rename = "Email Público")]
    pub public_email: String,
    #[serde(rename = "Teléfono Público")]
    pub public_phone: String,
    #[serde(rename = "Tiene Contacto Público")]
    pub has_public_contact: String,
    #[serde(rename = "Biografía con Links")]
    pub bio_has_link: String,
    #[serde(rename = "Es Cuenta Privada")]
    pub is_private: String,
    #[serde(rename = "Posts para promedio")]
    pub posts_for_average: u64,
    #[serde(rename = "Me gusta promedio")]
    pub average_likes: f64,
    #[serde(rename = "Comentarios promedio")]
    pub average_comments: f64,
    #[serde(rename = "Tasa de interacción")]
    pub engagement_rate: f64,
    #[serde(rename = "Error")]
    pub error: String,
}

/// One post per row, keyed by the owning username.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRow {
    #[serde(rename = "Nombre de usuario")]
    pub username: String,
    #[serde(rename = "PostId")]
    pub post_id: String,
    #[serde(rename = "Type")]
    pub kind: &'static str,
    #[serde(rename = "Likes")]
    pub likes: u64,
    #[serde(rename = "Comments")]
    pub comments: u64,
    #[serde(rename = "Caption")]
    pub caption: String,
    #[serde(rename = "Timestamp")]
    pub timestamp_ms: u64,
    #[serde(rename = "Fecha")]
    pub post_date: String,
    #[serde(rename = "Media URL")]
    pub media_url: String,
    #[serde(rename = "Carrusel")]
    pub is_carousel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountPivotRow {
    #[serde(rename = "Nombre de usuario")]
    pub username: String,
    #[serde(rename = "cantidad seguidores")]
    pub followers: f64,
    #[serde(rename = "cantidad de publicaciones")]
    pub posts: f64,
    #[serde(rename = "Me gusta promedio")]
    pub average_likes: f64,
    #[serde(rename = "Comentarios promedio")]
    pub average_comments: f64,
    #[serde(rename = "Tasa de interacción")]
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPivotRow {
    #[serde(rename = "Nombre de usuario")]
    pub username: String,
    #[serde(rename = "Type")]
    pub kind: &'static str,
    #[serde(rename = "Likes")]
    pub likes: f64,
    #[serde(rename = "Comments")]
    pub comments: f64,
}

/// The four sheets derived from one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub accounts: Vec<AccountRow>,
    pub posts: Vec<PostRow>,
    pub account_pivot: Vec<AccountPivotRow>,
    pub post_pivot: Vec<PostPivotRow>,
}

fn count(metric: &Metric<u64>) -> u64 {
    metric.as_ref().value().copied().unwrap_or(0)
}

fn number(metric: &Metric<f64>) -> f64 {
    metric.as_ref().value().copied().unwrap_or(0.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round2(values.iter().sum::<f64>() / values.len() as f64)
}

impl AccountRow {
    pub fn from_record(record: &AccountRecord) -> Self {
        let s = record.summary();
        Self {
            username: s.username.clone(),
            user_id: s.user_id.to_string(),
            full_name: s.full_name.to_string(),
            biography: s.biography.to_string(),
            country: s.country.to_string(),
            profile_url: s.profile_url.clone(),
            category: s.category.to_string(),
            followers: count(&s.follower_count),
            following: count(&s.following_count),
            posts: count(&s.post_count),
            is_verified: s.is_verified.to_string(),
            is_business_account: s.is_business_account.to_string(),
            has_highlights: s.has_highlights.to_string(),
            external_url: s.external_url.to_string(),
            public_email: s.public_email.to_string(),
            public_phone: s.public_phone.to_string(),
            has_public_contact: s.has_public_contact.to_string(),
            bio_has_link: s.bio_has_link.to_string(),
            is_private: s.is_private.to_string(),
            posts_for_average: s.posts_for_average,
            average_likes: number(&s.average_likes),
            average_comments: number(&s.average_comments),
            engagement_rate: number(&s.engagement_rate),
            error: record
                .failure()
                .map(|f| f.message().to_string())
                .unwrap_or_default(),
        }
    }
}

impl Workbook {
    pub fn from_records(records: &[AccountRecord]) -> Self {
        let accounts: Vec<AccountRow> = records.iter().map(AccountRow::from_record).collect();

        let posts: Vec<PostRow> = records
            .iter()
            .flat_map(|record| {
                let username = record.username();
                record.summary().recent_posts.iter().map(move |post| PostRow {
                    username: username.to_string(),
                    post_id: post.post_id.to_string(),
                    kind: post.kind.label(),
                    likes: post.likes,
                    comments: post.comments,
                    caption: post.caption.clone(),
                    timestamp_ms: post.timestamp_ms,
                    post_date: post.post_date.clone(),
                    media_url: post.media_url.clone(),
                    is_carousel: post.is_carousel.to_string(),
                })
            })
            .collect();

        let account_pivot = Self::pivot_accounts(&accounts);
        let post_pivot = Self::pivot_posts(&posts);

        Self {
            accounts,
            posts,
            account_pivot,
            post_pivot,
        }
    }

    fn pivot_accounts(accounts: &[AccountRow]) -> Vec<AccountPivotRow> {
        let mut groups: BTreeMap<&str, Vec<&AccountRow>> = BTreeMap::new();
        for row in accounts {
            groups.entry(row.username.as_str()).or_default().push(row);
        }

        groups
            .into_iter()
            .map(|(username, rows)| {
                let column = |f: fn(&AccountRow) -> f64| -> f64 {
                    mean(&rows.iter().map(|r| f(r)).collect::<Vec<_>>())
                };
                AccountPivotRow {
                    username: username.to_string(),
                    followers: column(|r| r.followers as f64),
                    posts: column(|r| r.posts as f64),
                    average_likes: column(|r| r.average_likes),
                    average_comments: column(|r| r.average_comments),
                    engagement_rate: column(|r| r.engagement_rate),
                }
            })
            .collect()
    }

    fn pivot_posts(posts: &[PostRow]) -> Vec<PostPivotRow> {
        let mut groups: BTreeMap<(&str, &'static str), (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for row in posts {
            let (likes, comments) = groups.entry((row.username.as_str(), row.kind)).or_default();
            likes.push(row.likes as f64);
            comments.push(row.comments as f64);
        }

        groups
            .into_iter()
            .map(|((username, kind), (likes, comments))| PostPivotRow {
                username: username.to_string(),
                kind,
                likes: mean(&likes),
                comments: mean(&comments),
            })
            .collect()
    }

    pub fn write_accounts<W: Write>(&self, writer: W) -> Result<(), AppError> {
        write_sheet(&self.accounts, writer)
    }

    pub fn write_posts<W: Write>(&self, writer: W) -> Result<(), AppError> {
        write_sheet(&self.posts, writer)
    }

    pub fn write_account_pivot<W: Write>(&self, writer: W) -> Result<(), AppError> {
        write_sheet(&self.account_pivot, writer)
    }

    pub fn write_post_pivot<W: Write>(&self, writer: W) -> Result<(), AppError> {
        write_sheet(&self.post_pivot, writer)
    }

    /// Writes the four sheets into `dir` (created if needed) and returns their paths.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        std::fs::create_dir_all(dir)?;

        let accounts = dir.join(ACCOUNTS_FILE);
        self.write_accounts(File::create(&accounts)?)?;
        let posts = dir.join(POSTS_FILE);
        self.write_posts(File::create(&posts)?)?;
        let account_pivot = dir.join(ACCOUNT_PIVOT_FILE);
        self.write_account_pivot(File::create(&account_pivot)?)?;
        let post_pivot = dir.join(POST_PIVOT_FILE);
        self.write_post_pivot(File::create(&post_pivot)?)?;

        Ok(vec![accounts, posts, account_pivot, post_pivot])
    }
}

fn write_sheet<R: Serialize, W: Write>(rows: &[R], writer: W) -> Result<(), AppError> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    debug!("Wrote {} rows", rows.len());
    Ok(())
}

/// Builds the workbook for `records` and writes it into `dir`.
///
/// Nothing is written for an empty batch; the returned list is then empty.
pub fn write_workbook(records: &[AccountRecord], dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    if records.is_empty() {
        info!("No records to export");
        return Ok(Vec::new());
    }
    let paths = Workbook::from_records(records).write_to_dir(dir)?;
    info!("Exported {} accounts to {}", records.len(), dir.display());
    Ok(paths)
}
