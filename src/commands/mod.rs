//! CLI command implementations
//!
//! `list` and `remove` run the same controller and binding as the TUI,
//! driven to completion on a current-thread runtime and rendered by
//! [`ConsoleView`].

mod console;
mod favorites;
mod list;
mod remove;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::binding::{ListBinding, ListScreen};
use crate::controller::PagedListController;
use crate::db::Database;
use crate::lifecycle::Lifecycle;
use crate::provider::LocalProvider;

pub use console::ConsoleView;
pub use favorites::{cmd_add, cmd_completions, cmd_config, cmd_import};
pub use list::cmd_list;
pub use remove::cmd_remove;

/// A headless list screen: controller, binding and the runtime they run on
pub struct Session {
    runtime: Runtime,
    binding: ListBinding,
    owner: Lifecycle,
}

impl Session {
    pub fn new(db: Arc<Database>, page_size: u32) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        let owner = Lifecycle::new();
        owner.start();
        let view = Lifecycle::new();
        view.start();

        let provider = Arc::new(LocalProvider::new(db, page_size));
        let (controller, streams) =
            PagedListController::new(provider, runtime.handle().clone(), owner.clone());

        Ok(Self {
            runtime,
            binding: ListBinding::new(controller, streams, view),
            owner,
        })
    }

    pub fn binding(&self) -> &ListBinding {
        &self.binding
    }

    pub fn controller(&self) -> &PagedListController {
        self.binding.controller()
    }

    /// Wait for `task`, then apply what it produced to `view`
    pub fn settle<V>(&mut self, task: JoinHandle<()>, view: &mut V) -> Result<()>
    where
        V: ListScreen + ?Sized,
    {
        self.runtime
            .block_on(task)
            .context("Provider task failed")?;
        self.binding.pump(view);
        Ok(())
    }

    /// Refresh, then keep loading pages until the end or an error
    pub fn load_all(&mut self, view: &mut ConsoleView) -> Result<()> {
        let task = self.binding.refresh();
        self.settle(task, view)?;
        while view.wants_more() {
            let task = self.binding.load_more();
            self.settle(task, view)?;
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.binding.lifecycle().destroy();
        self.owner.destroy();
    }
}
