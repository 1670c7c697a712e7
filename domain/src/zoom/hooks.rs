//! Payload hooks: named points where host code can inspect or rewrite an
//! operation's payload immediately before it is sent.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Every domain operation the client exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateUser,
    ListUsers,
    GetUserInfo,
    DeleteUser,
    ListMeetings,
    CreateMeeting,
    UpdateMeeting,
    GetMeetingInfo,
    GetPastMeetingInstances,
    DeleteMeeting,
    DeleteWebinar,
    GetDailyReport,
    GetAccountReport,
    RegisterWebinarParticipant,
    ListWebinars,
    CreateWebinar,
    UpdateWebinar,
    GetWebinarInfo,
    ListWebinarRegistrants,
    RecordingsByMeeting,
    ListRecordings,
}

impl Operation {
    /// The hook name host code filters this operation's payload by.
    pub fn filter_name(&self) -> &'static str {
        match self {
            Operation::CreateUser => "vczapi_createAUser",
            Operation::ListUsers => "vczapi_listUsers",
            Operation::GetUserInfo => "vczapi_getUserInfo",
            Operation::DeleteUser => "vczapi_deleteAUser",
            Operation::ListMeetings => "vczapi_listMeetings",
            Operation::CreateMeeting => "vczapi_createAmeeting",
            Operation::UpdateMeeting => "vczapi_updateMeetingInfo",
            Operation::GetMeetingInfo => "vczapi_getMeetingInfo",
            Operation::GetPastMeetingInstances => "vczapi_getPastMeetingDetails",
            Operation::DeleteMeeting => "vczapi_deleteAMeeting",
            Operation::DeleteWebinar => "vczapi_deleteAWebinar",
            Operation::GetDailyReport => "vczapi_getDailyReport",
            Operation::GetAccountReport => "vczapi_getAccountReport",
            Operation::RegisterWebinarParticipant => "vczapi_registerWebinarParticipants",
            Operation::ListWebinars => "vczapi_listWebinar",
            Operation::CreateWebinar => "vczapi_createAwebinar",
            Operation::UpdateWebinar => "vczapi_updateWebinar",
            Operation::GetWebinarInfo => "vczapi_getWebinarInfo",
            Operation::ListWebinarRegistrants => "vczapi_listWebinarParticipants",
            Operation::RecordingsByMeeting => "vczapi_recordingsByMeeting",
            Operation::ListRecordings => "vczapi_listRecording",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.filter_name())
    }
}

/// A transform applied to an operation's payload before dispatch.
///
/// Implemented for any `Fn(Operation, Value) -> Value`, so closures can be
/// registered directly. Hooks that only care about some operations return the
/// payload unchanged for the rest.
pub trait PayloadHook: Send + Sync {
    fn apply(&self, operation: Operation, payload: Value) -> Value;
}

impl<F> PayloadHook for F
where
    F: Fn(Operation, Value) -> Value + Send + Sync,
{
    fn apply(&self, operation: Operation, payload: Value) -> Value {
        self(operation, payload)
    }
}

/// Ordered list of registered payload hooks.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn PayloadHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook; hooks run in registration order.
    pub fn register<H>(&mut self, hook: H)
    where
        H: PayloadHook + 'static,
    {
        self.hooks.push(Arc::new(hook));
    }

    /// Builder-style [`HookRegistry::register`].
    pub fn with_hook<H>(mut self, hook: H) -> Self
    where
        H: PayloadHook + 'static,
    {
        self.register(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Thread `payload` through every hook in order and return the result.
    pub fn apply(&self, operation: Operation, payload: Value) -> Value {
        self.hooks
            .iter()
            .fold(payload, |payload, hook| hook.apply(operation, payload))
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
