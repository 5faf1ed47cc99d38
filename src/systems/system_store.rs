use crate::archetypes::{ArchetypeId, ArchetypeStore};
use crate::error::{EcsError, EcsResult};
use crate::systems::{ExecMode, SystemObject};
use std::collections::HashMap;
use crate::queries::Query;

/// A registered system and the storages it runs on.
pub(crate) struct SystemInfo {
	pub query: Query,
	pub exec_mode: ExecMode,
	pub system: Box<dyn SystemObject>,
	pub filtered: Vec<ArchetypeId>,
	seen: usize,
}

impl SystemInfo {
	/// Add the archetypes interned since the last refresh to the matching list.
	pub fn refresh(&mut self, archetypes: &ArchetypeStore) {
		if self.seen == archetypes.len() {
			return;
		}

		let query = &self.query;
		let new = archetypes.iter().skip(self.seen).filter(|s| query.matches(s.archetype()));
		self.filtered.extend(new.map(|s| s.id()));
		self.seen = archetypes.len();
	}
}

/// The systems of a world, in registration order.
#[derive(Default)]
pub(crate) struct SystemStore {
	names: HashMap<String, usize>,
	systems: Vec<SystemInfo>,
}

impl SystemStore {
	pub fn add_system(&mut self, system: Box<dyn SystemObject>, query: Query) -> EcsResult<()> {
		let name = system.name().to_owned();
		if self.names.contains_key(&name) {
			return Err(EcsError::DuplicateSystem(name));
		}

		log::debug!("registered system {name} ({:?})", system.exec_mode());

		self.names.insert(name, self.systems.len());
		self.systems.push(SystemInfo {
			query,
			exec_mode: system.exec_mode(),
			system,
			filtered: Vec::new(),
			seen: 0,
		});
		Ok(())
	}

	pub fn index_of(&self, name: &str) -> Option<usize> {
		self.names.get(name).copied()
	}

	pub fn get(&self, index: usize) -> &SystemInfo {
		&self.systems[index]
	}

	pub fn get_mut(&mut self, index: usize) -> &mut SystemInfo {
		&mut self.systems[index]
	}

	pub fn len(&self) -> usize {
		self.systems.len()
	}
}
