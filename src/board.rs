use std::collections::BTreeMap;
use std::fmt;

use egui::{Pos2, Rect, Vec2};

/// Opaque identifier of a [`Group`].
///
/// Host-supplied for the initial board, generated by the board itself when a tab is divided out
/// into a new group.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GroupId(String);

/// Opaque identifier of a [`Tab`]. Always supplied by the host and stable for the tab's lifetime.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TabId(String);

macro_rules! impl_string_id {
    ($name:ident) => {
        impl $name {
            /// Wrap a host-supplied id string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw id string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

impl_string_id!(GroupId);
impl_string_id!(TabId);

/// A named unit of content.
///
/// `group_id` is informational only: the owning [`Group::tab_ids`] list is what decides membership.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Tab {
    pub id: TabId,
    pub group_id: GroupId,
    pub name: String,
}

/// A positioned, resizable container of tabs.
///
/// Geometry is container-local: `position` is the top-left corner relative to the board
/// container's top-left corner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Group {
    pub id: GroupId,

    /// Ordered tab strip. Never empty while the group exists.
    pub tab_ids: Vec<TabId>,

    /// Always one of [`Self::tab_ids`].
    pub selected_tab_id: TabId,

    pub position: Pos2,
    pub size: Vec2,

    /// Geometry to restore when leaving full-screen. Only meaningful while
    /// [`Self::is_full_screen`] is set.
    pub prev_position: Pos2,
    pub prev_size: Vec2,

    pub is_full_screen: bool,
}

impl Group {
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn contains_tab(&self, tab_id: &TabId) -> bool {
        self.tab_ids.contains(tab_id)
    }

    pub fn tab_index(&self, tab_id: &TabId) -> Option<usize> {
        self.tab_ids.iter().position(|id| id == tab_id)
    }
}

/// The authoritative layout: every group and every tab.
///
/// Mutate it only through [`crate::BoardAction`]s (see [`Self::apply`] and [`crate::reduce_board`]).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Board {
    pub(crate) groups: BTreeMap<GroupId, Group>,
    pub(crate) tabs: ahash::HashMap<TabId, Tab>,

    /// Serial used to mint ids for groups created by a divide.
    #[cfg_attr(feature = "serde", serde(default = "first_group_serial"))]
    pub(crate) next_group_serial: u64,
}

#[cfg(feature = "serde")]
fn first_group_serial() -> u64 {
    1
}

impl Board {
    /// An empty board. Use [`crate::BoardBuilder`] to populate one.
    pub fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
            tabs: Default::default(),
            next_group_serial: 1,
        }
    }

    pub fn group(&self, group_id: &GroupId) -> Option<&Group> {
        self.groups.get(group_id)
    }

    pub fn tab(&self, tab_id: &TabId) -> Option<&Tab> {
        self.tabs.get(tab_id)
    }

    /// All groups, ordered by id.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// All tabs, in no particular order.
    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.values()
    }

    pub fn group_ids(&self) -> impl Iterator<Item = &GroupId> {
        self.groups.keys()
    }

    /// The group whose tab strip currently lists `tab_id`.
    pub fn group_of_tab(&self, tab_id: &TabId) -> Option<&GroupId> {
        self.groups
            .values()
            .find(|group| group.contains_tab(tab_id))
            .map(|group| &group.id)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn allocate_group_id(&mut self) -> GroupId {
        loop {
            let serial = self.next_group_serial.max(1);
            self.next_group_serial = serial.saturating_add(1);
            let id = GroupId(format!("group-{serial}"));
            if !self.groups.contains_key(&id) {
                return id;
            }
        }
    }
}
