//! Lifecycle of one asynchronous channel.

use serde::Serialize;

use crate::error::ChannelError;

/// Where a channel is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// The latest request landed
    Success,
    /// The latest request failed
    Error,
}

/// Status, data and error of one channel.
///
/// Fields are private so the constructors can hold the invariants:
/// `Success` always carries data and no error, `Error` always carries an
/// error. A channel replaces its state wholesale on every transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchState<T> {
    status: FetchStatus,
    data: Option<T>,
    error: Option<ChannelError>,
}

impl<T> FetchState<T> {
    /// Nothing requested yet.
    pub fn idle() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            error: None,
        }
    }

    /// Request in flight, nothing to show.
    pub fn loading() -> Self {
        Self {
            status: FetchStatus::Loading,
            data: None,
            error: None,
        }
    }

    /// Request in flight while the previous data stays readable
    /// (page navigation).
    pub fn reloading(data: Option<T>) -> Self {
        Self {
            status: FetchStatus::Loading,
            data,
            error: None,
        }
    }

    /// Request landed.
    pub fn success(data: T) -> Self {
        Self {
            status: FetchStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    /// Request failed; nothing to show.
    pub fn failed(error: impl Into<ChannelError>) -> Self {
        Self::failed_with(None, error)
    }

    /// Request failed; `data` is what the channel held before.
    pub fn failed_with(data: Option<T>, error: impl Into<ChannelError>) -> Self {
        Self {
            status: FetchStatus::Error,
            data,
            error: Some(error.into()),
        }
    }

    /// Current status.
    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Current data, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Current error, if any.
    pub fn error(&self) -> Option<&ChannelError> {
        self.error.as_ref()
    }

    /// Consume the state, keeping only the data.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// `status == Idle`
    pub fn is_idle(&self) -> bool {
        self.status == FetchStatus::Idle
    }

    /// `status == Loading`
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// `status == Success`
    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }

    /// `status == Error`
    pub fn is_error(&self) -> bool {
        self.status == FetchStatus::Error
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::idle()
    }
}
