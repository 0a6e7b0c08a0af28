use crate::{
    core::{
        config::ViewportOptions,
        geo::{CoordinateRegion, CoordinateSpan, LatLng},
    },
    macros::{map_debug, map_trace},
    traits::MapSurface,
};

/// Which viewport policy is in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportState {
    #[default]
    Unset,
    /// Centered on the device once; the user is in control from here on
    FollowingUser,
    /// Pinned to a fixed coordinate for the rest of the view's life
    FixedLocation,
}

/// User interaction switches of a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionToggles {
    pub zoom: bool,
    pub rotate: bool,
    pub scroll: bool,
    pub pitch: bool,
}

impl Default for InteractionToggles {
    fn default() -> Self {
        Self {
            zoom: true,
            rotate: true,
            scroll: true,
            pitch: true,
        }
    }
}

impl InteractionToggles {
    /// Zoom, rotate and scroll switched off; pitch left as is
    pub fn locked(self) -> Self {
        Self {
            zoom: false,
            rotate: false,
            scroll: false,
            ..self
        }
    }
}

/// What one update cycle should do to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportCommand {
    EnterFixedLocation { region: CoordinateRegion },
    FollowUser { region: CoordinateRegion, animated: bool },
    None,
}

/// Viewport state machine: `Unset → FollowingUser` or `Unset → FixedLocation`.
///
/// A fixed location always wins over the device location, and once entered no
/// later cycle touches the viewport. Following the user happens at most once.
#[derive(Debug, Clone)]
pub struct ViewportController {
    state: ViewportState,
    fixed_location: Option<LatLng>,
    options: ViewportOptions,
    has_followed_user: bool,
}

impl ViewportController {
    /// `fixed_location` of `(0, 0)` is treated as not supplied.
    pub fn new(fixed_location: Option<LatLng>, options: ViewportOptions) -> Self {
        Self {
            state: ViewportState::Unset,
            fixed_location: fixed_location.filter(|l| !l.is_unset_sentinel()),
            options,
            has_followed_user: false,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn fixed_location(&self) -> Option<LatLng> {
        self.fixed_location
    }

    pub fn has_followed_user(&self) -> bool {
        self.has_followed_user
    }

    /// Decides this cycle's command without touching any state.
    pub fn decide(&self, device_location: Option<LatLng>) -> ViewportCommand {
        if self.state == ViewportState::FixedLocation {
            return ViewportCommand::None;
        }

        if let Some(fixed) = self.fixed_location {
            return ViewportCommand::EnterFixedLocation {
                region: CoordinateRegion::new(fixed, CoordinateSpan::uniform(self.options.fixed_span)),
            };
        }

        match device_location {
            Some(location) if !self.has_followed_user => ViewportCommand::FollowUser {
                region: CoordinateRegion::new(
                    location,
                    CoordinateSpan::uniform(self.options.clamped_follow_span()),
                ),
                animated: self.options.animate_follow,
            },
            _ => ViewportCommand::None,
        }
    }

    /// Runs one cycle against `surface` and returns the resulting state.
    pub fn apply<S>(&mut self, surface: &mut S, device_location: Option<LatLng>) -> ViewportState
    where
        S: MapSurface + ?Sized,
    {
        match self.decide(device_location) {
            ViewportCommand::EnterFixedLocation { region } => {
                map_debug!(
                    "viewport pinned to ({:.5}, {:.5})",
                    region.center.lat,
                    region.center.lng
                );
                surface.set_region(region, false);
                let toggles = surface.interaction().locked();
                surface.set_interaction(toggles);
                surface.set_shows_user_location(true);
                self.state = ViewportState::FixedLocation;
            }
            ViewportCommand::FollowUser { region, animated } => {
                map_debug!(
                    "viewport centered on device at ({:.5}, {:.5})",
                    region.center.lat,
                    region.center.lng
                );
                surface.set_region(region, animated);
                surface.set_shows_user_location(true);
                if self.options.lock_rotation_after_follow {
                    let toggles = surface.interaction();
                    surface.set_interaction(InteractionToggles {
                        rotate: false,
                        ..toggles
                    });
                }
                self.has_followed_user = true;
                self.state = ViewportState::FollowingUser;
            }
            ViewportCommand::None => {
                map_trace!("viewport unchanged ({:?})", self.state);
            }
        }
        self.state
    }
}
