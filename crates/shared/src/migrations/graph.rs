//! Dependency graph over migrations.
//!
//! Migrations are ordered dependencies-first with Kahn's algorithm; ties are
//! broken by name so the plan is stable between runs.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::migration::Migration;
use crate::errors::MigrationError;
use crate::schema::ProjectState;

#[derive(Debug, Clone)]
pub struct MigrationGraph {
    nodes: BTreeMap<String, Migration>,
    order: Vec<String>,
}

impl MigrationGraph {
    pub fn new(migrations: Vec<Migration>) -> Result<Self, MigrationError> {
        let mut nodes = BTreeMap::new();
        for migration in migrations {
            if nodes.contains_key(&migration.name) {
                return Err(MigrationError::DuplicateMigration(migration.name));
            }
            nodes.insert(migration.name.clone(), migration);
        }

        for migration in nodes.values() {
            for dependency in &migration.dependencies {
                if !nodes.contains_key(dependency) {
                    return Err(MigrationError::UnknownDependency {
                        migration: migration.name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        let order = topological_sort(&nodes)?;
        Ok(Self { nodes, order })
    }

    pub fn get(&self, name: &str) -> Option<&Migration> {
        self.nodes.get(name)
    }

    pub fn migration(&self, name: &str) -> Result<&Migration, MigrationError> {
        self.get(name)
            .ok_or_else(|| MigrationError::UnknownMigration(name.to_string()))
    }

    /// Every migration, dependencies first.
    pub fn ordered(&self) -> impl Iterator<Item = &Migration> + '_ {
        self.order.iter().filter_map(|name| self.nodes.get(name))
    }

    /// Transitive dependencies of `name`, in apply order, excluding itself.
    pub fn ancestors(&self, name: &str) -> Result<Vec<&Migration>, MigrationError> {
        let root = self.migration(name)?;

        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = root.dependencies.iter().map(String::as_str).collect();
        while let Some(current) = stack.pop() {
            if seen.insert(current) {
                if let Some(migration) = self.nodes.get(current) {
                    stack.extend(migration.dependencies.iter().map(String::as_str));
                }
            }
        }

        Ok(self
            .ordered()
            .filter(|m| seen.contains(m.name.as_str()))
            .collect())
    }

    /// Unapplied migrations to run, in order. With a target, only the target
    /// and what it depends on are considered.
    pub fn plan(
        &self,
        applied: &HashSet<String>,
        target: Option<&str>,
    ) -> Result<Vec<&Migration>, MigrationError> {
        let wanted: Option<HashSet<&str>> = match target {
            Some(target) => {
                let mut names: HashSet<&str> = self
                    .ancestors(target)?
                    .into_iter()
                    .map(|m| m.name.as_str())
                    .collect();
                names.insert(self.migration(target)?.name.as_str());
                Some(names)
            }
            None => None,
        };

        Ok(self
            .ordered()
            .filter(|m| !applied.contains(&m.name))
            .filter(|m| wanted.as_ref().is_none_or(|w| w.contains(m.name.as_str())))
            .collect())
    }

    /// An applied migration must never sit on top of an unapplied one.
    pub fn check_consistency(&self, applied: &HashSet<String>) -> Result<(), MigrationError> {
        for migration in self.ordered().filter(|m| applied.contains(&m.name)) {
            if let Some(missing) = migration
                .dependencies
                .iter()
                .find(|dep| !applied.contains(*dep))
            {
                return Err(MigrationError::InconsistentHistory {
                    migration: migration.name.clone(),
                    dependency: missing.clone(),
                });
            }
        }
        Ok(())
    }

    /// Schema as it stands right before `name` runs.
    pub fn state_before(&self, name: &str) -> Result<ProjectState, MigrationError> {
        replay(self.ancestors(name)?)
    }

    /// Schema after every migration has run.
    pub fn project_state(&self) -> Result<ProjectState, MigrationError> {
        replay(self.ordered())
    }
}

fn replay<'a>(
    migrations: impl IntoIterator<Item = &'a Migration>,
) -> Result<ProjectState, MigrationError> {
    let mut state = ProjectState::new();
    for migration in migrations {
        for operation in &migration.operations {
            state.apply(operation)?;
        }
    }
    Ok(state)
}

fn topological_sort(nodes: &BTreeMap<String, Migration>) -> Result<Vec<String>, MigrationError> {
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();

    for (name, migration) in nodes {
        let dependencies: BTreeSet<&str> =
            migration.dependencies.iter().map(String::as_str).collect();
        in_degree.insert(name.as_str(), dependencies.len());
        for dependency in dependencies {
            dependents.entry(dependency).or_default().push(name.as_str());
        }
    }

    let mut ready: BTreeSet<&str> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(name, _)| *name)
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(current) = ready.pop_first() {
        order.push(current.to_string());

        for dependent in dependents.get(current).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(dependent) {
                *degree -= 1;
                if *degree == 0 {
                    ready.insert(*dependent);
                }
            }
        }
    }

    if order.len() != nodes.len() {
        let placed: HashSet<&str> = order.iter().map(String::as_str).collect();
        let stuck = nodes
            .keys()
            .filter(|name| !placed.contains(name.as_str()))
            .cloned()
            .collect();
        return Err(MigrationError::CircularDependency(stuck));
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<Migration> {
        vec![
            Migration::new("0003_c").depends_on("0002_b"),
            Migration::new("0001_a"),
            Migration::new("0002_b").depends_on("0001_a"),
        ]
    }

    fn names(migrations: &[&Migration]) -> Vec<String> {
        migrations.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn orders_dependencies_first() {
        let graph = MigrationGraph::new(chain()).unwrap();
        let order: Vec<&str> = graph.ordered().map(|m| m.name.as_str()).collect();
        assert_eq!(order, vec!["0001_a", "0002_b", "0003_c"]);
    }

    #[test]
    fn diamond_is_ordered_deterministically() {
        let graph = MigrationGraph::new(vec![
            Migration::new("0004_merge")
                .depends_on("0002_left")
                .depends_on("0003_right"),
            Migration::new("0003_right").depends_on("0001_root"),
            Migration::new("0002_left").depends_on("0001_root"),
            Migration::new("0001_root"),
        ])
        .unwrap();

        let order: Vec<&str> = graph.ordered().map(|m| m.name.as_str()).collect();
        assert_eq!(order, vec!["0001_root", "0002_left", "0003_right", "0004_merge"]);
    }

    #[test]
    fn rejects_cycles() {
        let err = MigrationGraph::new(vec![
            Migration::new("0001_a").depends_on("0002_b"),
            Migration::new("0002_b").depends_on("0001_a"),
            Migration::new("0003_free"),
        ])
        .unwrap_err();

        match err {
            MigrationError::CircularDependency(stuck) => {
                assert_eq!(stuck, vec!["0001_a".to_string(), "0002_b".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_dependency_and_duplicates() {
        assert!(matches!(
            MigrationGraph::new(vec![Migration::new("0002_b").depends_on("0001_a")]),
            Err(MigrationError::UnknownDependency { .. })
        ));
        assert!(matches!(
            MigrationGraph::new(vec![Migration::new("0001_a"), Migration::new("0001_a")]),
            Err(MigrationError::DuplicateMigration(_))
        ));
    }

    #[test]
    fn plan_skips_applied_and_stops_at_target() {
        let graph = MigrationGraph::new(chain()).unwrap();
        let applied: HashSet<String> = ["0001_a".to_string()].into_iter().collect();

        assert_eq!(
            names(&graph.plan(&applied, None).unwrap()),
            vec!["0002_b", "0003_c"]
        );
        assert_eq!(
            names(&graph.plan(&applied, Some("0002_b")).unwrap()),
            vec!["0002_b"]
        );
        assert!(graph.plan(&applied, Some("0001_a")).unwrap().is_empty());
        assert!(matches!(
            graph.plan(&applied, Some("0009_nope")),
            Err(MigrationError::UnknownMigration(_))
        ));
    }

    #[test]
    fn detects_inconsistent_history() {
        let graph = MigrationGraph::new(chain()).unwrap();
        let applied: HashSet<String> = ["0001_a".to_string(), "0003_c".to_string()]
            .into_iter()
            .collect();

        assert!(matches!(
            graph.check_consistency(&applied),
            Err(MigrationError::InconsistentHistory { migration, dependency })
                if migration == "0003_c" && dependency == "0002_b"
        ));
    }

    #[test]
    fn ancestors_are_transitive() {
        let graph = MigrationGraph::new(chain()).unwrap();
        assert_eq!(
            names(&graph.ancestors("0003_c").unwrap()),
            vec!["0001_a", "0002_b"]
        );
        assert!(graph.ancestors("0001_a").unwrap().is_empty());
    }
}
