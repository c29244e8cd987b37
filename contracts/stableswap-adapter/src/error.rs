use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AdapterError {
    /// `initialize` was already called on this deployment
    AlreadyInitialized = 1,
    /// Pool approvals have not been granted yet
    NotInitialized = 2,
    /// Address or pool index is not one of the three configured tokens
    UnsupportedToken = 3,
    /// Token is configured but not valid for the requested direction
    InvalidToken = 4,
    NegativeNotAllowed = 5,
    /// Constructor arguments do not describe a three-asset pool
    InvalidConfig = 6,
}
