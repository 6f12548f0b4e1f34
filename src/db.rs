use anyhow::Context;
use sqlx::{PgPool, Row};

use crate::models::{CourseRef, MetaLink, ResourceEvent};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let courses = vec![
        (101_i64, "PHYS101", "Physics I"),
        (102, "PHYS102", "Physics II"),
        (201, "PHYS-LAB", "Physics Lab (combined)"),
    ];

    for (id, shortname, fullname) in courses {
        sqlx::query(
            r#"
            INSERT INTO course_overview_campus.course (id, shortname, fullname)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET shortname = EXCLUDED.shortname, fullname = EXCLUDED.fullname
            "#,
        )
        .bind(id)
        .bind(shortname)
        .bind(fullname)
        .execute(pool)
        .await?;
    }

    // The combined lab course pulls its roster from both lectures.
    for parent in [101_i64, 102] {
        sqlx::query(
            r#"
            INSERT INTO course_overview_campus.enrol (enrol, courseid, customint1)
            VALUES ('meta', $1, $2)
            ON CONFLICT (enrol, courseid, customint1) DO NOTHING
            "#,
        )
        .bind(201_i64)
        .bind(parent)
        .execute(pool)
        .await?;
    }

    sqlx::query(
        r#"
        INSERT INTO course_overview_campus.user_lastaccess (userid, courseid, timeaccess)
        VALUES ($1, $2, $3)
        ON CONFLICT (userid, courseid) DO UPDATE SET timeaccess = EXCLUDED.timeaccess
        "#,
    )
    .bind(7_i64)
    .bind(201_i64)
    .bind(1_706_745_600_i64)
    .execute(pool)
    .await?;

    let modules = vec![
        (1_i64, 201_i64, "page", 1_706_000_000_i64, true, true),
        (2, 201, "resource", 1_707_000_000, true, true),
        (3, 201, "resource", 1_707_100_000, true, true),
        (4, 201, "url", 1_707_200_000, false, true),
        (5, 201, "label", 1_707_300_000, true, false),
        (6, 201, "quiz", 1_707_400_000, true, true),
    ];

    for (id, course, modname, added, visible, has_view) in modules {
        sqlx::query(
            r#"
            INSERT INTO course_overview_campus.course_modules
            (id, course, modname, added, visible, has_view)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(course)
        .bind(modname)
        .bind(added)
        .bind(visible)
        .bind(has_view)
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Most recent access of `user_id` to `course_id`, `None` when they never visited.
pub async fn last_access(
    pool: &PgPool,
    user_id: i64,
    course_id: i64,
) -> anyhow::Result<Option<i64>> {
    let row = sqlx::query(
        "SELECT timeaccess FROM course_overview_campus.user_lastaccess \
         WHERE userid = $1 AND courseid = $2",
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await
    .context("failed to look up last course access")?;

    Ok(row.map(|row| row.get("timeaccess")))
}

/// Turns a last-access lookup into a badge cutoff. A missing record or a failed
/// lookup gives 0, so every resource counts as new.
pub fn cutoff_from_lookup(lookup: anyhow::Result<Option<i64>>) -> i64 {
    match lookup {
        Ok(Some(timeaccess)) => timeaccess,
        Ok(None) => 0,
        Err(err) => {
            log::warn!("treating course as never visited: {err:#}");
            0
        }
    }
}

/// Cutoff for the new-resource badges of `user_id` in `course_id`.
pub async fn cutoff_for(pool: &PgPool, user_id: i64, course_id: i64) -> i64 {
    let lookup = last_access(pool, user_id, course_id)
        .await
        .with_context(|| format!("user {user_id} in course {course_id}"));
    cutoff_from_lookup(lookup)
}

/// Parent courses a child course is meta-linked to.
pub async fn meta_links(pool: &PgPool, course_id: i64) -> anyhow::Result<Vec<MetaLink>> {
    let rows = sqlx::query(
        "SELECT e.customint1 AS parent_id, p.shortname AS parent_code, e.courseid AS child_id \
         FROM course_overview_campus.enrol e \
         JOIN course_overview_campus.course p ON p.id = e.customint1 \
         JOIN course_overview_campus.course c ON c.id = e.courseid \
         WHERE e.enrol = $1 AND e.courseid = $2 \
         ORDER BY e.id",
    )
    .bind("meta")
    .bind(course_id)
    .fetch_all(pool)
    .await
    .context("failed to look up meta links")?;

    let mut links = Vec::new();
    for row in rows {
        links.push(MetaLink {
            parent_id: row.get("parent_id"),
            parent_code: row.get("parent_code"),
            child_id: row.get("child_id"),
        });
    }

    Ok(links)
}

/// Meta links from a lookup, empty if the lookup failed.
pub fn links_from_lookup(lookup: anyhow::Result<Vec<MetaLink>>) -> Vec<MetaLink> {
    lookup.unwrap_or_else(|err| {
        log::warn!("no meta link badge: {err:#}");
        Vec::new()
    })
}

/// Meta links of a course, empty if the lookup fails.
pub async fn meta_links_or_empty(pool: &PgPool, course_id: i64) -> Vec<MetaLink> {
    let lookup = meta_links(pool, course_id)
        .await
        .with_context(|| format!("course {course_id}"));
    links_from_lookup(lookup)
}

pub async fn course_resources(
    pool: &PgPool,
    course_id: i64,
) -> anyhow::Result<Vec<ResourceEvent>> {
    let rows = sqlx::query(
        "SELECT modname, added, visible, has_view \
         FROM course_overview_campus.course_modules \
         WHERE course = $1 ORDER BY id",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
    .context("failed to load course modules")?;

    let mut events = Vec::new();
    for row in rows {
        events.push(ResourceEvent {
            type_tag: row.get("modname"),
            added: row.get("added"),
            visible: row.get("visible"),
            has_view: row.get("has_view"),
        });
    }

    Ok(events)
}

pub async fn courses(pool: &PgPool) -> anyhow::Result<Vec<CourseRef>> {
    let rows = sqlx::query("SELECT id, shortname FROM course_overview_campus.course ORDER BY id")
        .fetch_all(pool)
        .await
        .context("failed to list courses")?;

    Ok(rows
        .into_iter()
        .map(|row| CourseRef {
            id: row.get("id"),
            shortname: row.get("shortname"),
        })
        .collect())
}

pub async fn course(pool: &PgPool, course_id: i64) -> anyhow::Result<Option<CourseRef>> {
    let row = sqlx::query("SELECT id, shortname FROM course_overview_campus.course WHERE id = $1")
        .bind(course_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| CourseRef {
        id: row.get("id"),
        shortname: row.get("shortname"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_access_is_the_cutoff() {
        assert_eq!(cutoff_from_lookup(Ok(Some(1_706_745_600))), 1_706_745_600);
    }

    #[test]
    fn missing_access_record_gives_zero_cutoff() {
        assert_eq!(cutoff_from_lookup(Ok(None)), 0);
    }

    #[test]
    fn failed_access_lookup_gives_zero_cutoff() {
        let failed = Err(anyhow::anyhow!("connection reset"));
        assert_eq!(cutoff_from_lookup(failed), 0);
    }

    #[test]
    fn meta_links_pass_through() {
        let links = vec![MetaLink {
            parent_id: 101,
            parent_code: "PHYS101".to_string(),
            child_id: 201,
        }];
        assert_eq!(links_from_lookup(Ok(links.clone())), links);
    }

    #[test]
    fn failed_meta_link_lookup_gives_no_links() {
        let failed = Err(anyhow::anyhow!("relation does not exist"));
        assert!(links_from_lookup(failed).is_empty());
    }
}
