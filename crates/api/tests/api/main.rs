mod climate_store;
