//! Kanban board partition and drag-drop resolution.

use crate::task::domain::{ParseTaskStatusError, Task, TaskId, TaskStatus};

/// Tasks split into one column per status.
///
/// The partition is stable: each column keeps the order of the input list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    todo: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
}

impl Board {
    /// Partitions tasks by status without reordering them.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut board = Self::default();
        for task in tasks {
            board.column_mut(task.status()).push(task.clone());
        }
        board
    }

    const fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Returns the tasks in one column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    /// Returns every column in display order.
    #[must_use]
    pub fn columns(&self) -> [(TaskStatus, &[Task]); 3] {
        TaskStatus::ALL.map(|status| (status, self.column(status)))
    }

    /// Returns the total number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns `true` when no column holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What a dragged card was released over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A column container.
    Column(TaskStatus),
    /// Another card. Reordering within a column is not supported.
    Task(TaskId),
}

impl DropTarget {
    /// Parses a column container identifier such as `IN_PROGRESS`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskStatusError`] for identifiers that name no column.
    pub fn parse_column(id: &str) -> Result<Self, ParseTaskStatusError> {
        TaskStatus::try_from(id).map(Self::Column)
    }
}

/// End of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    /// The dragged task.
    pub task_id: TaskId,
    /// Where it was released, if over anything.
    pub over: Option<DropTarget>,
}

impl DragEnd {
    /// Creates a drag-end event.
    #[must_use]
    pub const fn new(task_id: TaskId, over: Option<DropTarget>) -> Self {
        Self { task_id, over }
    }

    /// Returns the column the task should move to, if the drop names one.
    ///
    /// Dropping on the task's current column still yields that column.
    #[must_use]
    pub const fn target_status(&self) -> Option<TaskStatus> {
        match self.over {
            Some(DropTarget::Column(status)) => Some(status),
            Some(DropTarget::Task(_)) | None => None,
        }
    }
}

/// Pointer position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle. The left and top edges are inclusive, the
/// right and bottom edges exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Width; non-positive widths contain nothing.
    pub width: i32,
    /// Height; non-positive heights contain nothing.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns `true` when the point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let (x, y) = (i64::from(point.x), i64::from(point.y));
        let (left, top) = (i64::from(self.left), i64::from(self.top));
        x >= left
            && y >= top
            && x < left + i64::from(self.width)
            && y < top + i64::from(self.height)
    }

    /// Squared distance from the rectangle's centre to `point`, in doubled
    /// coordinates so that odd sizes need no division.
    fn doubled_distance_sq(&self, point: Point) -> i128 {
        let centre_x = 2 * i128::from(self.left) + i128::from(self.width);
        let centre_y = 2 * i128::from(self.top) + i128::from(self.height);
        let dx = 2 * i128::from(point.x) - centre_x;
        let dy = 2 * i128::from(point.y) - centre_y;
        dx * dx + dy * dy
    }
}

/// Screen area occupied by one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRegion {
    /// Column shown in the region.
    pub status: TaskStatus,
    /// Bounds of the region.
    pub rect: Rect,
}

impl ColumnRegion {
    /// Creates a column region.
    #[must_use]
    pub const fn new(status: TaskStatus, rect: Rect) -> Self {
        Self { status, rect }
    }
}

/// Resolves the column under the pointer at the end of a drag.
///
/// Among the regions containing the pointer, the one whose centre is nearest
/// wins; on a tie the earlier region wins. Returns `None` when the pointer is
/// outside every region.
#[must_use]
pub fn resolve_drop(pointer: Point, regions: &[ColumnRegion]) -> Option<DropTarget> {
    regions
        .iter()
        .filter(|region| region.rect.contains(pointer))
        .min_by_key(|region| region.rect.doubled_distance_sq(pointer))
        .map(|region| DropTarget::Column(region.status))
}
