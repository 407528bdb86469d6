//! Shipped remediations, one module per fix.

pub mod rds_enable_auto_minor_version_upgrade;

pub use rds_enable_auto_minor_version_upgrade::AwsRdsEnableAutoMinorVersionUpgrade;
