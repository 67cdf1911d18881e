use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{ClassInstance, YogaClass};

pub async fn fetch_yoga_classes(db: &SqlitePool) -> Result<Vec<YogaClass>, sqlx::Error> {
    sqlx::query_as::<_, YogaClass>(
        r#"
        SELECT id, day_of_week, time, class_type, price, capacity, duration, description
        FROM yoga_classes
        ORDER BY seq
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn insert_yoga_class(
    conn: &mut SqliteConnection,
    class: &YogaClass,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO yoga_classes
            (id, day_of_week, time, class_type, price, capacity, duration, description)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&class.id)
    .bind(&class.day_of_week)
    .bind(&class.time)
    .bind(&class.class_type)
    .bind(class.price)
    .bind(class.capacity)
    .bind(class.duration)
    .bind(&class.description)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn delete_all_yoga_classes(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM yoga_classes")
        .execute(conn)
        .await?
        .rows_affected();

    Ok(result)
}

pub async fn fetch_class_instances(db: &SqlitePool) -> Result<Vec<ClassInstance>, sqlx::Error> {
    sqlx::query_as::<_, ClassInstance>(
        r#"
        SELECT id, yoga_class_id, date, teacher, comments
        FROM class_instances
        ORDER BY seq
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn fetch_class_instances_by_class_ids(
    db: &SqlitePool,
    class_ids: &[String],
) -> Result<Vec<ClassInstance>, sqlx::Error> {
    if class_ids.is_empty() {
        return Ok(Vec::new());
    }

    // One bound JSON array instead of one variable per id; SQLite caps bound
    // variables per statement.
    let ids = serde_json::to_string(class_ids).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    sqlx::query_as::<_, ClassInstance>(
        r#"
        SELECT id, yoga_class_id, date, teacher, comments
        FROM class_instances
        WHERE yoga_class_id IN (SELECT value FROM json_each(?1))
        ORDER BY seq
        "#,
    )
    .bind(ids)
    .fetch_all(db)
    .await
}

pub async fn insert_class_instance(
    conn: &mut SqliteConnection,
    instance: &ClassInstance,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO class_instances
            (id, yoga_class_id, date, teacher, comments)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&instance.id)
    .bind(&instance.yoga_class_id)
    .bind(&instance.date)
    .bind(&instance.teacher)
    .bind(&instance.comments)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn delete_all_class_instances(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM class_instances")
        .execute(conn)
        .await?
        .rows_affected();

    Ok(result)
}
