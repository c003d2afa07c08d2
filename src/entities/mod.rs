pub mod device_grant;

pub use device_grant::Entity as DeviceGrant;
