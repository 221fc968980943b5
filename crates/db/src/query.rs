//! SQL construction for the report queries.
//!
//! Every builder returns a [`QueryBuilder`] whose filter values are bound as
//! `$n` parameters. Only static SQL and the integer age boundaries of
//! [`AgeBucket`] are ever written into the statement text.

use reporteria_core::age::AgeBucket;
use reporteria_core::filters::{
    AgeDistributionFilters, CampaignEffectivenessFilters, DonationsByCampaignFilters,
    DonationsByDonorFilters, VolunteersByActivityFilters,
};
use reporteria_core::types::Date;
use sqlx::{Encode, Postgres, QueryBuilder, Type};

/// Row cap of the donations-by-donor drill-down.
pub const DONOR_REPORT_LIMIT: i64 = 50;

/// Append `AND <predicate><$n>` when `value` is present.
///
/// The caller's statement must already have an open `WHERE`/`ON` clause.
fn push_filter<'args, T>(qb: &mut QueryBuilder<'args, Postgres>, predicate: &str, value: Option<T>)
where
    T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
{
    if let Some(value) = value {
        qb.push(" AND ").push(predicate).push_bind(value);
    }
}

/// Append the completed-years age of `birth_column` at `reference`.
fn push_age_years(qb: &mut QueryBuilder<'_, Postgres>, birth_column: &str, reference: Date) {
    qb.push("EXTRACT(YEAR FROM AGE(")
        .push_bind(reference)
        .push("::DATE, ")
        .push(birth_column)
        .push("))::INT");
}

/// SQL condition selecting ages inside `bucket`, rendered from
/// [`AgeBucket::bounds`].
fn bucket_condition(bucket: AgeBucket, age_column: &str) -> String {
    match bucket.bounds() {
        (None, Some(max)) => format!("{age_column} <= {max}"),
        (Some(min), Some(max)) => format!("{age_column} BETWEEN {min} AND {max}"),
        (Some(min), None) => format!("{age_column} >= {min}"),
        (None, None) => "TRUE".to_string(),
    }
}

/// `CASE` expression mapping an age column to its bucket rank.
///
/// The age distribution report groups and orders by this single
/// expression, so bucket assignment and bucket order always agree.
pub fn age_bucket_rank_sql(age_column: &str) -> String {
    let arms: Vec<String> = AgeBucket::ALL
        .into_iter()
        .map(|bucket| {
            format!(
                "WHEN {} THEN {}",
                bucket_condition(bucket, age_column),
                bucket.rank()
            )
        })
        .collect();
    format!("CASE {} END", arms.join(" "))
}

// ---------------------------------------------------------------------------
// Report statements
// ---------------------------------------------------------------------------

/// Donations by campaign. Donation filters sit on the join so campaigns
/// without matching donations still appear with zero totals.
pub fn donations_by_campaign(
    filters: &DonationsByCampaignFilters,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT \
             c.campana_id, \
             c.nombre AS campana, \
             COUNT(d.donacion_id) AS total_donaciones, \
             COALESCE(SUM(d.monto), 0)::FLOAT8 AS monto_total, \
             c.fecha_inicio, \
             c.fecha_fin, \
             c.meta_monetaria::FLOAT8 AS meta_monetaria, \
             safe_divide(COALESCE(SUM(d.monto), 0), c.meta_monetaria)::FLOAT8 \
                 AS porcentaje_cumplimiento \
         FROM campana c \
         LEFT JOIN donacion d ON d.campana_id = c.campana_id",
    );
    push_filter(&mut qb, "d.fecha >= ", filters.fecha_inicio);
    push_filter(&mut qb, "d.fecha <= ", filters.fecha_fin);
    push_filter(&mut qb, "d.monto >= ", filters.monto_minimo);
    push_filter(&mut qb, "d.monto <= ", filters.monto_maximo);
    qb.push(
        " GROUP BY c.campana_id, c.nombre, c.fecha_inicio, c.fecha_fin, c.meta_monetaria \
         ORDER BY monto_total DESC NULLS LAST, c.campana_id",
    );
    qb
}

/// Volunteers by activity. Age filters restrict which volunteers are
/// counted; activity date filters restrict which activities are listed.
pub fn volunteers_by_activity(
    filters: &VolunteersByActivityFilters,
    reference: Date,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT \
             a.actividad_id, \
             a.nombre AS actividad, \
             COUNT(DISTINCT v.voluntario_id) AS total_voluntarios, \
             a.fecha_inicio, \
             a.fecha_fin, \
             AVG(",
    );
    push_age_years(&mut qb, "v.fecha_nacimiento", reference);
    qb.push(
        ")::FLOAT8 AS edad_promedio \
         FROM actividad a \
         LEFT JOIN (voluntario_actividad va \
             JOIN voluntario v ON v.voluntario_id = va.voluntario_id",
    );
    if let Some(min) = filters.edad_minima {
        qb.push(" AND ");
        push_age_years(&mut qb, "v.fecha_nacimiento", reference);
        qb.push(" >= ").push_bind(min);
    }
    if let Some(max) = filters.edad_maxima {
        qb.push(" AND ");
        push_age_years(&mut qb, "v.fecha_nacimiento", reference);
        qb.push(" <= ").push_bind(max);
    }
    qb.push(") ON va.actividad_id = a.actividad_id WHERE TRUE");
    push_filter(&mut qb, "a.fecha_inicio >= ", filters.fecha_inicio);
    push_filter(&mut qb, "a.fecha_fin <= ", filters.fecha_fin);
    qb.push(
        " GROUP BY a.actividad_id, a.nombre, a.fecha_inicio, a.fecha_fin \
         ORDER BY total_voluntarios DESC NULLS LAST, a.actividad_id",
    );
    qb
}

/// Donations by donor, capped at [`DONOR_REPORT_LIMIT`] rows.
pub fn donations_by_donor(filters: &DonationsByDonorFilters) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT \
             d.donante_id, \
             dn.tipo AS tipo_donante, \
             dn.nombre, \
             dn.apellido, \
             dn.empresa, \
             COUNT(d.donacion_id) AS total_donaciones, \
             SUM(d.monto)::FLOAT8 AS monto_total, \
             MAX(d.fecha) AS ultima_donacion \
         FROM donacion d \
         JOIN donante dn ON dn.donante_id = d.donante_id \
         WHERE TRUE",
    );
    push_filter(&mut qb, "d.fecha >= ", filters.fecha_inicio);
    push_filter(&mut qb, "d.fecha <= ", filters.fecha_fin);
    push_filter(
        &mut qb,
        "dn.tipo = ",
        filters.tipo_donante.map(|t| t.as_str()),
    );
    push_filter(&mut qb, "d.monto >= ", filters.monto_minimo);
    qb.push(
        " GROUP BY d.donante_id, dn.tipo, dn.nombre, dn.apellido, dn.empresa \
         ORDER BY monto_total DESC NULLS LAST, d.donante_id \
         LIMIT ",
    )
    .push_bind(DONOR_REPORT_LIMIT);
    qb
}

/// Volunteer age distribution over the five fixed buckets.
///
/// Volunteers without a birth date cannot be placed in a bucket and are
/// left out. Each volunteer is counted once however many matching
/// activities they joined.
pub fn age_distribution(
    filters: &AgeDistributionFilters,
    reference: Date,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(age_bucket_rank_sql("edades.edad"))
        .push(
            " AS rango, \
             COUNT(*) AS total_voluntarios, \
             ROUND(AVG(edades.edad))::FLOAT8 AS edad_promedio \
             FROM (SELECT DISTINCT v.voluntario_id, ",
        );
    push_age_years(&mut qb, "v.fecha_nacimiento", reference);
    qb.push(
        " AS edad \
         FROM voluntario v \
         JOIN voluntario_actividad va ON va.voluntario_id = v.voluntario_id \
         JOIN actividad a ON a.actividad_id = va.actividad_id \
         WHERE v.fecha_nacimiento IS NOT NULL",
    );
    push_filter(&mut qb, "a.fecha_inicio >= ", filters.fecha_inicio);
    push_filter(&mut qb, "a.fecha_fin <= ", filters.fecha_fin);
    push_filter(&mut qb, "v.genero = ", filters.genero.clone());
    push_filter(&mut qb, "a.actividad_id = ", filters.actividad_id);
    qb.push(") edades GROUP BY rango ORDER BY rango");
    qb
}

/// Campaign effectiveness ranked by completion ratio.
pub fn campaign_effectiveness(
    filters: &CampaignEffectivenessFilters,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT \
             c.campana_id, \
             c.nombre AS campana, \
             c.fecha_inicio, \
             c.fecha_fin, \
             c.meta_monetaria::FLOAT8 AS meta_monetaria, \
             COALESCE(SUM(d.monto), 0)::FLOAT8 AS monto_recaudado, \
             safe_divide(SUM(d.monto), c.meta_monetaria)::FLOAT8 AS porcentaje_cumplimiento, \
             COUNT(d.donacion_id) AS total_donaciones \
         FROM campana c \
         LEFT JOIN donacion d ON d.campana_id = c.campana_id \
         WHERE TRUE",
    );
    push_filter(&mut qb, "c.fecha_inicio >= ", filters.fecha_inicio);
    push_filter(&mut qb, "c.fecha_fin <= ", filters.fecha_fin);
    push_filter(&mut qb, "c.meta_monetaria >= ", filters.monto_objetivo_min);
    push_filter(&mut qb, "c.meta_monetaria <= ", filters.monto_objetivo_max);
    push_filter(&mut qb, "c.estado = ", filters.estado.map(|s| s.as_str()));
    qb.push(
        " GROUP BY c.campana_id, c.nombre, c.fecha_inicio, c.fecha_fin, c.meta_monetaria \
         ORDER BY porcentaje_cumplimiento DESC NULLS LAST, c.campana_id",
    );
    qb
}

#[cfg(test)]
mod tests {
    use reporteria_core::campaign::CampaignStatus;
    use reporteria_core::donor::DonorType;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn placeholder_count(sql: &str) -> usize {
        sql.matches('$').count()
    }

    #[test]
    fn rank_sql_covers_every_bucket_in_order() {
        let sql = age_bucket_rank_sql("edad");
        assert_eq!(
            sql,
            "CASE WHEN edad <= 17 THEN 1 \
             WHEN edad BETWEEN 18 AND 25 THEN 2 \
             WHEN edad BETWEEN 26 AND 35 THEN 3 \
             WHEN edad BETWEEN 36 AND 50 THEN 4 \
             WHEN edad >= 51 THEN 5 END"
        );
    }

    #[test]
    fn campaign_query_without_filters_has_no_parameters() {
        let qb = donations_by_campaign(&DonationsByCampaignFilters::default());
        let sql = qb.sql();
        assert_eq!(placeholder_count(sql), 0);
        assert!(sql.contains("LEFT JOIN donacion d ON d.campana_id = c.campana_id GROUP BY"));
        assert!(sql.contains("ORDER BY monto_total DESC NULLS LAST"));
    }

    #[test]
    fn campaign_filters_are_bound_on_the_join() {
        let filters = DonationsByCampaignFilters {
            fecha_inicio: Some(date(2024, 1, 1)),
            fecha_fin: Some(date(2024, 12, 31)),
            monto_minimo: Some(0.0),
            monto_maximo: Some(10_000.0),
        };
        let qb = donations_by_campaign(&filters);
        let sql = qb.sql();
        assert!(sql.contains(
            "ON d.campana_id = c.campana_id AND d.fecha >= $1 AND d.fecha <= $2 \
             AND d.monto >= $3 AND d.monto <= $4 GROUP BY"
        ));
        assert!(!sql.contains("2024"));
        assert!(!sql.contains("10000"));
    }

    #[test]
    fn zero_is_a_constraint_not_an_absent_filter() {
        let filters = DonationsByDonorFilters {
            monto_minimo: Some(0.0),
            ..Default::default()
        };
        let qb = donations_by_donor(&filters);
        assert!(qb.sql().contains("d.monto >= $1"));
    }

    #[test]
    fn donor_query_is_limited() {
        let qb = donations_by_donor(&DonationsByDonorFilters::default());
        let sql = qb.sql();
        assert!(sql.ends_with("LIMIT $1"));
        assert!(sql.contains("ORDER BY monto_total DESC NULLS LAST"));
    }

    #[test]
    fn donor_type_is_bound() {
        let filters = DonationsByDonorFilters {
            tipo_donante: Some(DonorType::Company),
            ..Default::default()
        };
        let qb = donations_by_donor(&filters);
        let sql = qb.sql();
        assert!(sql.contains("dn.tipo = $1"));
        assert!(sql.ends_with("LIMIT $2"));
        assert!(!sql.contains("'empresa'"));
    }

    #[test]
    fn volunteer_query_binds_reference_date_and_ages() {
        let filters = VolunteersByActivityFilters {
            edad_minima: Some(18),
            edad_maxima: Some(65),
            fecha_inicio: Some(date(2024, 1, 1)),
            fecha_fin: None,
        };
        let qb = volunteers_by_activity(&filters, date(2024, 6, 1));
        let sql = qb.sql();
        // Reference date for the average, then (reference, bound) per age filter,
        // then the activity start date.
        assert_eq!(placeholder_count(sql), 6);
        assert!(sql.contains("AVG(EXTRACT(YEAR FROM AGE($1::DATE, v.fecha_nacimiento))::INT)"));
        assert!(sql.contains("AGE($2::DATE, v.fecha_nacimiento))::INT >= $3"));
        assert!(sql.contains("AGE($4::DATE, v.fecha_nacimiento))::INT <= $5"));
        assert!(sql.contains("WHERE TRUE AND a.fecha_inicio >= $6"));
        assert!(!sql.contains("CURRENT_DATE"));
    }

    #[test]
    fn age_distribution_groups_and_orders_by_one_expression() {
        let qb = age_distribution(&AgeDistributionFilters::default(), date(2024, 6, 1));
        let sql = qb.sql();
        assert_eq!(sql.matches("CASE").count(), 1);
        assert!(sql.ends_with("GROUP BY rango ORDER BY rango"));
        assert!(sql.contains("v.fecha_nacimiento IS NOT NULL"));
        assert_eq!(placeholder_count(sql), 1);
    }

    #[test]
    fn age_distribution_filters() {
        let filters = AgeDistributionFilters {
            fecha_inicio: None,
            fecha_fin: Some(date(2024, 12, 31)),
            genero: Some("Femenino".into()),
            actividad_id: Some(4),
        };
        let qb = age_distribution(&filters, date(2024, 6, 1));
        let sql = qb.sql();
        assert!(sql.contains("AND a.fecha_fin <= $2 AND v.genero = $3 AND a.actividad_id = $4"));
        assert!(!sql.contains("Femenino"));
    }

    #[test]
    fn effectiveness_filters_apply_to_campaigns() {
        let filters = CampaignEffectivenessFilters {
            monto_objetivo_min: Some(100.0),
            estado: Some(CampaignStatus::Activa),
            ..Default::default()
        };
        let qb = campaign_effectiveness(&filters);
        let sql = qb.sql();
        assert!(sql.contains("WHERE TRUE AND c.meta_monetaria >= $1 AND c.estado = $2 GROUP BY"));
        assert!(sql.contains("ORDER BY porcentaje_cumplimiento DESC NULLS LAST"));
        assert!(sql.contains("safe_divide(SUM(d.monto), c.meta_monetaria)"));
    }
}
