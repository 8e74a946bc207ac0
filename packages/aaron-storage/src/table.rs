use std::collections::{HashMap, VecDeque};

/// Insertion-ordered map keyed by record id.
///
/// With a non-zero capacity the table behaves as a ring buffer and evicts its oldest row.
#[derive(Debug)]
pub(crate) struct Table<T> {
	rows: HashMap<String, T>,
	order: VecDeque<String>,
	capacity: usize,
}
impl<T> Table<T> {
	pub(crate) fn unbounded() -> Self {
		Self::with_capacity(0)
	}

	pub(crate) fn with_capacity(capacity: usize) -> Self {
		Self { rows: HashMap::new(), order: VecDeque::new(), capacity }
	}

	#[cfg(test)]
	pub(crate) fn len(&self) -> usize {
		self.rows.len()
	}

	pub(crate) fn get(&self, id: &str) -> Option<&T> {
		self.rows.get(id)
	}

	pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut T> {
		self.rows.get_mut(id)
	}

	/// Inserts a new row and returns the id evicted to make room, if any.
	pub(crate) fn insert(&mut self, id: String, row: T) -> Option<String> {
		if self.rows.insert(id.clone(), row).is_none() {
			self.order.push_back(id);
		}
		if self.capacity > 0 && self.rows.len() > self.capacity {
			let evicted = self.order.pop_front()?;

			self.rows.remove(&evicted);

			return Some(evicted);
		}

		None
	}

	/// Rows in insertion order, oldest first.
	pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
		self.order.iter().filter_map(|id| self.rows.get(id))
	}
}
