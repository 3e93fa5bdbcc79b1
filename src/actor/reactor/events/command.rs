use tracing::{debug, info};

use crate::actor::reactor::{Command, Reactor, ReactorCommand, StateAction};
use crate::layout_engine::LayoutCommand;
use crate::sys::window_system::{WindowId, WindowSystem};

pub struct CommandEventHandler;

impl CommandEventHandler {
    pub fn handle_command<S: WindowSystem>(
        reactor: &mut Reactor<S>,
        window: Option<WindowId>,
        command: Command,
    ) {
        match command {
            Command::Layout(cmd) => Self::handle_command_layout(reactor, window, cmd),
            Command::Reactor(cmd) => Self::handle_command_reactor(reactor, window, cmd),
        }
    }

    /// The explicit window if it is managed, else the active client.
    fn target<S: WindowSystem>(reactor: &Reactor<S>, window: Option<WindowId>) -> Option<WindowId> {
        window.or(reactor.registry.active()).filter(|&w| reactor.registry.contains(w))
    }

    pub fn handle_command_layout<S: WindowSystem>(
        reactor: &mut Reactor<S>,
        window: Option<WindowId>,
        cmd: LayoutCommand,
    ) {
        info!(?cmd);
        let Some(window) = Self::target(reactor, window) else {
            debug!(?cmd, "no target window, dropping command");
            return;
        };
        let response = reactor.layout_engine.handle_command(&mut reactor.registry, window, cmd);
        reactor.handle_layout_response(response);
    }

    pub fn handle_command_reactor<S: WindowSystem>(
        reactor: &mut Reactor<S>,
        window: Option<WindowId>,
        cmd: ReactorCommand,
    ) {
        info!(?cmd);
        match cmd {
            ReactorCommand::Cycle { reverse, in_group } => return reactor.cycle(reverse, in_group),
            ReactorCommand::CycleEnd => return reactor.cycle_end(reactor.screen),
            _ => {}
        }

        let Some(window) = Self::target(reactor, window) else {
            debug!(?cmd, "no target window, dropping command");
            return;
        };
        match cmd {
            ReactorCommand::Focus => {
                let hidden = reactor.registry.get(window).is_some_and(|c| c.flags.hidden);
                if hidden {
                    reactor.unhide(window);
                } else {
                    reactor.raise(window);
                }
                reactor.set_active(window, true);
            }
            ReactorCommand::Hide => reactor.hide(window),
            ReactorCommand::Raise => reactor.raise(window),
            ReactorCommand::Lower => reactor.lower(window),
            ReactorCommand::Delete => reactor.delete(window),
            ReactorCommand::PointerWarp => reactor.warp_pointer_to(window),
            ReactorCommand::ToggleGroup { shortcut } => reactor.toggle_group(window, shortcut),
            ReactorCommand::Ungroup => reactor.ungroup(window),
            ReactorCommand::ChangeState { action, vertical, horizontal, hidden } => {
                Self::change_state(reactor, window, action, vertical, horizontal, hidden)
            }
            ReactorCommand::Cycle { .. } | ReactorCommand::CycleEnd => {}
        }
    }

    fn change_state<S: WindowSystem>(
        reactor: &mut Reactor<S>,
        window: WindowId,
        action: StateAction,
        vertical: bool,
        horizontal: bool,
        hidden: bool,
    ) {
        let Some(client) = reactor.registry.get(window) else { return };
        let flags = client.flags;

        let toggle = match (vertical, horizontal) {
            (true, true) => match action.target(flags.maximized()) {
                true if !flags.maximized() => Some(LayoutCommand::ToggleMaximize),
                false if flags.maximized() => Some(LayoutCommand::ToggleMaximize),
                // Dropping both axes from a partial maximize clears the one set.
                false if flags.vmaximized => Some(LayoutCommand::ToggleVMaximize),
                false if flags.hmaximized => Some(LayoutCommand::ToggleHMaximize),
                _ => None,
            },
            (true, false) if action.target(flags.vmaximized) != flags.vmaximized => {
                Some(LayoutCommand::ToggleVMaximize)
            }
            (false, true) if action.target(flags.hmaximized) != flags.hmaximized => {
                Some(LayoutCommand::ToggleHMaximize)
            }
            _ => None,
        };
        if let Some(cmd) = toggle {
            let response = reactor.layout_engine.handle_command(&mut reactor.registry, window, cmd);
            reactor.handle_layout_response(response);
        }

        if hidden && action.target(flags.hidden) != flags.hidden {
            if flags.hidden {
                reactor.unhide(window);
            } else {
                reactor.hide(window);
            }
        }
    }
}
