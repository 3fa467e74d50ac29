use uuid::Uuid;

use crate::models::Plant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
}

/// Transient user-facing message produced by storefront actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub plant: Plant,
    pub quantity: u32,
}

/// In-memory cart; lost when the process ends.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Adds `quantity` of `plant`, merging into an existing line for the same plant.
    pub fn add(&mut self, plant: Plant, quantity: u32) -> Notification {
        let message = format!("{} added to cart!", plant.name);
        match self.lines.iter_mut().find(|line| line.plant.id == plant.id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine { plant, quantity }),
        }
        Notification::success(message)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Favorites {
    ids: Vec<Uuid>,
}

impl Favorites {
    pub fn toggle(&mut self, plant: &Plant) -> Notification {
        if let Some(pos) = self.ids.iter().position(|id| *id == plant.id) {
            self.ids.remove(pos);
            Notification::info(format!("{} removed from favorites", plant.name))
        } else {
            self.ids.push(plant.id);
            Notification::info(format!("{} added to favorites!", plant.name))
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }
}
