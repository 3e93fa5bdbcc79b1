use serde::{Deserialize, Serialize};

use crate::sys::window_system::{NetWmState, WindowId};

/// Changes published to in-process observers, mirroring what is written to
/// the root window for external pagers and taskbars.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[serde(tag = "type")]
pub enum BroadcastEvent {
    ClientListChanged {
        windows: Vec<WindowId>,
    },
    ActiveWindowChanged {
        window: Option<WindowId>,
    },
    StateChanged {
        window: WindowId,
        state: NetWmState,
    },
}

pub type BroadcastSender = crate::actor::Sender<BroadcastEvent>;
pub type BroadcastReceiver = crate::actor::Receiver<BroadcastEvent>;
