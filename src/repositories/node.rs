//! Node repository: label/property lookups, creation, relationships and the
//! similarity traversal, generic over every model kind.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::context::{AppGraph, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::{Params, QueryExt};
use crate::models::{Connections, Entity, Filter, ModelKind, OrderBy, Relation};
use crate::services::pagination::clamp_start;

/// Property names are interpolated into Cypher, so only plain identifiers
/// are accepted.
fn is_identifier(property: &str) -> bool {
    let mut chars = property.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_property(kind: ModelKind, property: &str) -> Result<(), AppError> {
    if is_identifier(property) {
        Ok(())
    } else {
        Err(AppError::invalid_arguments(
            kind,
            format!("invalid property name '{}'", property),
        ))
    }
}

/// Renders ` WHERE n.a = $f0 AND n.b = $f1` (empty for no conditions) and
/// its parameters.
fn where_clause(kind: ModelKind, filter: &Filter) -> Result<(String, Params), AppError> {
    let mut params = Params::new();
    if filter.is_empty() {
        return Ok((String::new(), params));
    }

    let mut conditions = Vec::with_capacity(filter.conditions().len());
    for (i, (property, value)) in filter.conditions().iter().enumerate() {
        check_property(kind, property)?;
        let name = format!("f{}", i);
        conditions.push(format!("n.{} = ${}", property, name));
        params.insert(name, value.clone());
    }
    Ok((format!(" WHERE {}", conditions.join(" AND ")), params))
}

fn order_clause(kind: ModelKind, order: &OrderBy) -> Result<String, AppError> {
    check_property(kind, &order.property)?;
    let direction = if order.descending { "DESC" } else { "ASC" };
    Ok(format!("ORDER BY n.{} {}", order.property, direction))
}

/// Repository for catalog nodes of any [`ModelKind`].
#[derive(FromContext, Clone)]
pub struct NodeRepository {
    graph: AppGraph,
}

impl NodeRepository {
    /// Find the first node of `kind` matching `filter`.
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        kind: ModelKind,
        filter: &Filter,
    ) -> Result<Option<T>, AppError> {
        let (where_sql, params) = where_clause(kind, filter)?;
        let cypher = format!(
            "MATCH (n:{}){} RETURN n {{ .* }} AS n LIMIT 1",
            kind.label(),
            where_sql
        );

        let row = self.graph.query(&cypher).params(params).fetch_one().await?;
        row.map(|row| row.get("n")).transpose()
    }

    /// Count nodes of `kind` matching `filter`.
    pub async fn count(&self, kind: ModelKind, filter: &Filter) -> Result<u64, AppError> {
        let (where_sql, params) = where_clause(kind, filter)?;
        let cypher = format!(
            "MATCH (n:{}){} RETURN count(n) AS total",
            kind.label(),
            where_sql
        );

        let row = self.graph.query(&cypher).params(params).fetch_one().await?;
        match row {
            Some(row) => row.get("total"),
            None => Ok(0),
        }
    }

    /// List nodes of `kind` matching `filter`, ordered, skipping `start`.
    ///
    /// `limit` of `None` returns every remaining node.
    pub async fn list<T: DeserializeOwned>(
        &self,
        kind: ModelKind,
        filter: &Filter,
        order: &OrderBy,
        start: u64,
        limit: Option<u64>,
    ) -> Result<Vec<T>, AppError> {
        let (where_sql, params) = where_clause(kind, filter)?;
        let order_sql = order_clause(kind, order)?;
        let limit_sql = if limit.is_some() { " LIMIT $limit" } else { "" };
        let cypher = format!(
            "MATCH (n:{}){} RETURN n {{ .* }} AS n {} SKIP $skip{}",
            kind.label(),
            where_sql,
            order_sql,
            limit_sql
        );

        let mut query = self
            .graph
            .query(&cypher)
            .params(params)
            .param("skip", clamp_start(start));
        if let Some(limit) = limit {
            query = query.param("limit", limit);
        }

        query
            .fetch_all()
            .await?
            .iter()
            .map(|row| row.get("n"))
            .collect()
    }

    /// Create a node carrying every label of `kind`.
    ///
    /// `properties` must already include `name` and `node_id`. A duplicate
    /// name surfaces as [`AppError::ConstraintViolation`].
    pub async fn create(
        &self,
        kind: ModelKind,
        properties: JsonMap<String, JsonValue>,
    ) -> Result<Entity, AppError> {
        let cypher = format!(
            "CREATE (n:{} $props) RETURN n {{ .name, .node_id }} AS n",
            kind.label_expr()
        );

        let row = self
            .graph
            .query(&cypher)
            .param_raw("props", JsonValue::Object(properties))
            .fetch_one()
            .await?;

        match row {
            Some(row) => row.get("n"),
            None => Err(AppError::Internal(format!(
                "CREATE {} returned no row",
                kind
            ))),
        }
    }

    /// Link a node to a target, creating the relationship only once.
    pub async fn connect(
        &self,
        kind: ModelKind,
        node_id: &str,
        relation: Relation,
        target_id: &str,
    ) -> Result<(), AppError> {
        let cypher = format!(
            "MATCH (a:{} {{node_id: $from}}), (b:{} {{node_id: $to}}) MERGE (a)-[:{}]->(b)",
            kind.label(),
            relation.target().label(),
            relation.rel_type()
        );

        self.graph
            .query(&cypher)
            .param("from", node_id)
            .param("to", target_id)
            .run()
            .await
    }

    /// Delete nodes of `kind` matching `filter` along with their relationships.
    pub async fn delete(&self, kind: ModelKind, filter: &Filter) -> Result<(), AppError> {
        let (where_sql, params) = where_clause(kind, filter)?;
        let cypher = format!("MATCH (n:{}){} DETACH DELETE n", kind.label(), where_sql);

        self.graph.query(&cypher).params(params).run().await
    }

    /// Relationship targets of the given nodes, keyed by `node_id`.
    ///
    /// Targets are sorted by name. Nodes without a match are absent.
    pub async fn connections(
        &self,
        kind: ModelKind,
        node_ids: &[String],
    ) -> Result<HashMap<String, Connections>, AppError> {
        let relations = kind.relations();
        if relations.is_empty() || node_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let columns: Vec<String> = relations
            .iter()
            .map(|relation| {
                format!(
                    "[(n)-[:{}]-(x:{}) | x {{ .name, .node_id }}] AS {}",
                    relation.rel_type(),
                    relation.target().label(),
                    relation.field()
                )
            })
            .collect();
        let cypher = format!(
            "MATCH (n:{}) WHERE n.node_id IN $node_ids RETURN n.node_id AS node_id, {}",
            kind.label(),
            columns.join(", ")
        );

        let rows = self
            .graph
            .query(&cypher)
            .param("node_ids", node_ids)
            .fetch_all()
            .await?;

        let mut result = HashMap::with_capacity(rows.len());
        for row in rows {
            let node_id: String = row.get("node_id")?;
            let mut connections = Connections::default();
            for relation in relations {
                let mut targets: Vec<Entity> =
                    row.get_opt(relation.field())?.unwrap_or_default();
                targets.sort_by(|a, b| a.name.cmp(&b.name));
                targets.dedup();
                connections.set(*relation, targets);
            }
            result.insert(node_id, connections);
        }
        Ok(result)
    }

    /// Nodes of `kind` two undirected hops from the base node, ranked by
    /// the number of distinct shared intermediate nodes.
    ///
    /// The base node itself is never returned. Ties are ordered by name.
    pub async fn similar<T: DeserializeOwned>(
        &self,
        kind: ModelKind,
        node_id: &str,
        start: u64,
        limit: Option<u64>,
    ) -> Result<Vec<T>, AppError> {
        let label = kind.label();
        let limit_sql = if limit.is_some() { " LIMIT $limit" } else { "" };
        let cypher = format!(
            "MATCH (base:{label} {{node_id: $node_id}})--(connected)--(similar:{label}) \
             WHERE similar <> base \
             RETURN similar {{ .* }} AS similar, count(DISTINCT connected) AS shared \
             ORDER BY shared DESC, similar.name ASC \
             SKIP $skip{limit_sql}"
        );

        let mut query = self
            .graph
            .query(&cypher)
            .param("node_id", node_id)
            .param("skip", clamp_start(start));
        if let Some(limit) = limit {
            query = query.param("limit", limit);
        }

        query
            .fetch_all()
            .await?
            .iter()
            .map(|row| row.get("similar"))
            .collect()
    }
}
