//! Chat Hub
//!
//! Tracks open chat connections and department rooms, and fans frames out to
//! room members.

use std::collections::{HashMap, HashSet};

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::messages::ServerEvent;

/// Identity a connection announced when joining a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMember {
    pub user_id: Option<i64>,
    pub user_name: String,
}

/// Open connection with its outgoing queue
struct Connection {
    sender: mpsc::UnboundedSender<ServerEvent>,
    /// Rooms joined, keyed by department ID
    rooms: HashMap<i64, RoomMember>,
}

/// Result of removing a connection from one room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub department_id: i64,
    pub member: RoomMember,
    pub online: usize,
}

/// Registry of chat connections and room memberships.
///
/// Locks on `connections` and `rooms` are never held at the same time.
pub struct ChatHub {
    connections: DashMap<Uuid, Connection>,
    rooms: DashMap<i64, HashSet<Uuid>>,
}

impl ChatHub {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    /// Register a new connection
    pub fn register(&self, connection_id: Uuid, sender: mpsc::UnboundedSender<ServerEvent>) {
        self.connections.insert(
            connection_id,
            Connection {
                sender,
                rooms: HashMap::new(),
            },
        );
        tracing::debug!(connection_id = %connection_id, "Chat connection registered");
    }

    /// Remove a connection from every room it joined and forget it.
    pub fn unregister(&self, connection_id: Uuid) -> Vec<Departure> {
        let Some((_, connection)) = self.connections.remove(&connection_id) else {
            return Vec::new();
        };

        let departures = connection
            .rooms
            .into_iter()
            .map(|(department_id, member)| Departure {
                department_id,
                member,
                online: self.remove_from_room(department_id, connection_id),
            })
            .collect();

        tracing::debug!(connection_id = %connection_id, "Chat connection unregistered");
        departures
    }

    /// Add a connection to a room. Returns the room size afterwards, or
    /// `None` for an unknown connection. Re-joining updates the identity.
    pub fn join(&self, connection_id: Uuid, department_id: i64, member: RoomMember) -> Option<usize> {
        {
            let mut connection = self.connections.get_mut(&connection_id)?;
            connection.rooms.insert(department_id, member);
        }

        let mut room = self.rooms.entry(department_id).or_default();
        room.insert(connection_id);
        Some(room.len())
    }

    /// Remove a connection from a room. `None` when it was not a member.
    pub fn leave(&self, connection_id: Uuid, department_id: i64) -> Option<Departure> {
        let member = {
            let mut connection = self.connections.get_mut(&connection_id)?;
            connection.rooms.remove(&department_id)?
        };

        Some(Departure {
            department_id,
            member,
            online: self.remove_from_room(department_id, connection_id),
        })
    }

    /// Send a frame to every connection in a room. Returns the number of
    /// connections it was queued for.
    pub fn broadcast(&self, department_id: i64, event: &ServerEvent) -> usize {
        let members: Vec<Uuid> = match self.rooms.get(&department_id) {
            Some(room) => room.iter().copied().collect(),
            None => return 0,
        };

        members
            .into_iter()
            .filter(|id| {
                self.connections
                    .get(id)
                    .map(|c| c.sender.send(event.clone()).is_ok())
                    .unwrap_or(false)
            })
            .count()
    }

    /// Distinct connections in a room
    pub fn online(&self, department_id: i64) -> usize {
        self.rooms.get(&department_id).map(|r| r.len()).unwrap_or(0)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_member(&self, connection_id: Uuid, department_id: i64) -> bool {
        self.connections
            .get(&connection_id)
            .map(|c| c.rooms.contains_key(&department_id))
            .unwrap_or(false)
    }

    fn remove_from_room(&self, department_id: i64, connection_id: Uuid) -> usize {
        let online = match self.rooms.get_mut(&department_id) {
            Some(mut room) => {
                room.remove(&connection_id);
                room.len()
            }
            None => 0,
        };
        if online == 0 {
            self.rooms.remove_if(&department_id, |_, room| room.is_empty());
        }
        online
    }
}

impl Default for ChatHub {
    fn default() -> Self {
        Self::new()
    }
}
