//! One-shot catalog seeding. Administrative offline job: wipes and reloads
//! the whole catalog from a JSON definition file, never a runtime code path.

use std::path::Path;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use crate::db::Db;
use crate::models::CatalogDef;

pub async fn run(db: &Db, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read catalog file {}", path.display()))?;
    let def: CatalogDef =
        serde_json::from_str(&raw).wrap_err("catalog file is not a valid definition")?;

    for game_type in &def.game_types {
        if game_type.min_questions > game_type.max_questions {
            color_eyre::eyre::bail!(
                "game type '{}' has minQuestions > maxQuestions",
                game_type.id
            );
        }
    }

    let (game_types, questions) = db.replace_catalog(&def).await?;

    tracing::info!("seeded {game_types} game types with {questions} questions");
    Ok(())
}
