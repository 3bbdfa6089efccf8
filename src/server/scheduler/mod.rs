pub mod booking_completion;
