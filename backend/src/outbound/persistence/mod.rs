//! Persistence adapters for the participant store port.

mod json_participant_repository;

pub use json_participant_repository::JsonParticipantRepository;
