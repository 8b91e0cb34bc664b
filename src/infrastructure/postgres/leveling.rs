use diesel::prelude::*;

use crate::domain::leveling::TableThresholds;
use crate::infrastructure::postgres::schema::level_settings;

/// Loads every configured threshold in one query so the level-up loop runs
/// entirely in memory, however many levels a single grant crosses.
pub(crate) fn load_thresholds(conn: &mut PgConnection) -> QueryResult<TableThresholds> {
    let rows = level_settings::table
        .select((level_settings::level, level_settings::points_required))
        .load::<(i32, i64)>(conn)?;

    Ok(TableThresholds::new(rows))
}
